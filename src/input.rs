//! Reading terminal input on a background thread
use crossterm::event::Event;
use log::{debug, error};
use std::io;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Whatever the input thread produced: an event, or the error that stopped it
pub(crate) type InputResult = io::Result<Event>;

/// A blocking source of input events
pub(crate) trait EventSource: Send + 'static {
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Events read from the terminal via crossterm
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        crossterm::event::read()
    }
}

/// Start a thread that forwards every event from `source` into the returned
/// queue, in order.  The thread stops after forwarding the first error or
/// once the receiving end is dropped.
pub(crate) fn spawn<S: EventSource>(mut source: S) -> io::Result<Receiver<InputResult>> {
    let (sender, receiver) = channel();
    let _ = thread::Builder::new()
        .name(String::from("input"))
        .spawn(move || loop {
            let r = source.next_event();
            if let Err(ref e) = r {
                error!("Failed to read input: {e}");
            }
            let stop = r.is_err();
            if sender.send(r).is_err() {
                debug!("Input queue closed; input thread exiting");
                break;
            }
            if stop {
                break;
            }
        })?;
    Ok(receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    #[derive(Debug)]
    struct Scripted(VecDeque<Event>);

    impl EventSource for Scripted {
        fn next_event(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script finished"))
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn forwards_in_order_then_stops_on_error() {
        let events = [key(KeyCode::Up), key(KeyCode::Left), key(KeyCode::Esc)];
        let receiver = spawn(Scripted(VecDeque::from(events.clone()))).unwrap();
        for ev in events {
            assert_eq!(receiver.recv().unwrap().unwrap(), ev);
        }
        let e = receiver.recv().unwrap().unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);
        // The thread has exited and dropped its sender
        assert!(receiver.recv().is_err());
    }
}
