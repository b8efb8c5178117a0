use log::warn;
use ratatui::DefaultTerminal;
use std::io;

/// The terminal, switched into raw mode & the alternate screen for as long as
/// this value lives
#[derive(Debug)]
pub(crate) struct Display {
    terminal: DefaultTerminal,
}

impl Display {
    /// Take over the terminal.  If that fails partway through, whatever was
    /// changed is put back before returning the error.
    pub(crate) fn init() -> io::Result<Display> {
        let terminal = acquire(ratatui::try_init, ratatui::try_restore)?;
        Ok(Display { terminal })
    }

    pub(crate) fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        if let Err(e) = ratatui::try_restore() {
            warn!("Failed to restore terminal: {e}");
        }
    }
}

/// Run `init`; if it fails, run `restore` and return the error from `init`
fn acquire<T, I, R>(init: I, restore: R) -> io::Result<T>
where
    I: FnOnce() -> io::Result<T>,
    R: FnOnce() -> io::Result<()>,
{
    init().inspect_err(|_| {
        if let Err(e) = restore() {
            warn!("Failed to restore terminal after failed init: {e}");
        }
    })
}
