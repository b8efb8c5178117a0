mod app;
mod command;
mod config;
mod consts;
mod display;
mod game;
mod input;
mod util;
use crate::app::App;
use crate::config::{Config, LogConfig};
use crate::display::Display;
use crate::game::Game;
use crate::input::TerminalEvents;
use anyhow::Context;
use log::info;
use simplelog::WriteLogger;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("termsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::locate_and_load().context("failed to load configuration")?;
    init_logging(&config.log)?;
    info!("Starting termsnake {}", env!("CARGO_PKG_VERSION"));
    let mut display = Display::init().context("failed to initialize terminal")?;
    let events = input::spawn(TerminalEvents).context("failed to start input thread")?;
    let mut app = App::new(Game::new(config.game), events);
    let ending = app.run(display.terminal())?;
    info!("Finished: {ending:?}");
    Ok(())
}

fn init_logging(cfg: &LogConfig) -> anyhow::Result<()> {
    let Some(ref path) = cfg.file else {
        return Ok(());
    };
    let file = fs_err::File::create(path).context("failed to open log file")?;
    WriteLogger::init(cfg.level, simplelog::Config::default(), file)
        .context("failed to install logger")?;
    Ok(())
}
