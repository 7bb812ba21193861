//! Terminal setup and teardown
//!
//! Raw mode and the alternate screen are restored on exit and from the
//! panic hook.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;

use crate::config::Settings;
use crate::storage::Storage;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(250);

pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI until the user quits
pub fn run_tui(storage: &Storage, settings: &mut Settings) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = run_loop(&mut terminal, storage, settings);
    restore_terminal()?;
    result
}

fn run_loop(terminal: &mut Tui, storage: &Storage, settings: &mut Settings) -> Result<()> {
    let mut app = App::new(storage, settings);
    let events = EventHandler::new(TICK_RATE);
    tracing::info!("tui started");

    while !app.should_quit {
        terminal.draw(|frame| super::screens::render(frame, &app))?;
        handle_event(&mut app, events.next()?);
    }

    tracing::info!("tui stopped");
    Ok(())
}
