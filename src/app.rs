use crate::command::Command;
use crate::game::{Direction, Game, Outcome, Phase};
use crate::input::InputResult;
use crossterm::event::Event;
use log::{debug, info, trace};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Instant;
use thiserror::Error;

/// The control loop: interleaves clock ticks with input from the input
/// thread and redraws the game after each one
#[derive(Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    game: Game<R>,
    events: Receiver<InputResult>,
    /// When the next tick is due.  `None` until the clock is (re)started for
    /// the current level.
    next_tick: Option<Instant>,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(game: Game<R>, events: Receiver<InputResult>) -> App<R> {
        App {
            game,
            events,
            next_tick: None,
        }
    }

    /// Play until the game is won or lost or the user exits.  After a win or
    /// loss, the final screen stays up until the user acknowledges it.
    pub(crate) fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<Ending, AppError> {
        let ending = loop {
            match self.game.phase() {
                Phase::LevelStart => {
                    self.game.start_level();
                    // Each level gets a fresh clock at its own speed.
                    self.next_tick = None;
                }
                Phase::Running => (),
                Phase::LevelWon => {
                    self.game.advance_level();
                    continue;
                }
                Phase::GameLost => break Ending::Lost,
                Phase::GameComplete => break Ending::Won,
            }
            self.draw(terminal)?;
            if self.step()? == Flow::Exit {
                info!("Exiting at user's request");
                return Ok(Ending::Exited);
            }
        };
        info!(
            "Game ended ({ending:?}) on level {} with score {}",
            self.game.level(),
            self.game.score()
        );
        self.draw(terminal)?;
        self.await_acknowledgment()?;
        Ok(ending)
    }

    /// Wait for whichever comes first, the next tick or the next input
    /// event, and apply it to the game
    fn step(&mut self) -> Result<Flow, AppError> {
        let speed = self.game.speed();
        let when = *self.next_tick.get_or_insert_with(|| Instant::now() + speed);
        let wait = when.saturating_duration_since(Instant::now());
        if wait.is_zero() {
            self.tick();
            return Ok(Flow::Continue);
        }
        match self.events.recv_timeout(wait) {
            Ok(Ok(event)) => Ok(self.handle_event(&event)),
            Ok(Err(e)) => Err(AppError::Input(e)),
            Err(RecvTimeoutError::Timeout) => {
                self.tick();
                Ok(Flow::Continue)
            }
            Err(RecvTimeoutError::Disconnected) => Err(AppError::InputClosed),
        }
    }

    fn tick(&mut self) {
        self.next_tick = None;
        let outcome = self.game.tick();
        if outcome != Outcome::InProgress {
            debug!("Tick on level {} produced {outcome:?}", self.game.level());
        }
    }

    /// Block until the user dismisses the final screen
    fn await_acknowledgment(&mut self) -> Result<(), AppError> {
        loop {
            match self.events.recv() {
                Ok(Ok(event)) => {
                    if event
                        .as_key_press_event()
                        .and_then(Command::from_key_event)
                        .is_some_and(Command::acknowledges)
                    {
                        return Ok(());
                    }
                }
                Ok(Err(e)) => return Err(AppError::Input(e)),
                Err(_) => return Err(AppError::InputClosed),
            }
        }
    }
}

impl<R> App<R> {
    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        terminal
            .draw(|frame| frame.render_widget(&self.game, frame.area()))
            .map_err(AppError::Draw)?;
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) -> Flow {
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return Flow::Continue;
        };
        trace!("Received command {cmd:?}");
        match cmd {
            Command::Exit => return Flow::Exit,
            Command::Up => self.game.turn(Direction::North),
            Command::Down => self.game.turn(Direction::South),
            Command::Left => self.game.turn(Direction::West),
            Command::Right => self.game.turn(Direction::East),
            Command::Enter => (),
        }
        Flow::Continue
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Flow {
    Continue,
    Exit,
}

/// How a call to [`App::run()`] finished
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    /// The user pressed the exit key
    Exited,
    /// The last level was cleared
    Won,
    /// The snake ran into itself
    Lost,
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to draw to the terminal")]
    Draw(#[source] io::Error),
    #[error("failed to read input from the terminal")]
    Input(#[source] io::Error),
    #[error("input thread stopped unexpectedly")]
    InputClosed,
}
