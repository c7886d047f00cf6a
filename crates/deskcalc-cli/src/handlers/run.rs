//! Run command handler: the interactive terminal loop

use std::io::{self, Write};

use crossterm::{
    cursor::Show,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deskcalc::tui::{render, CalculatorApp};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::error::CliResult;

/// Raw mode, alternate screen and mouse capture, undone on drop
///
/// Created right after raw mode is switched on, so any later set-up
/// failure still leaves the user with a usable shell.
#[derive(Debug)]
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = restore_terminal(&mut io::stdout()) {
            warn!(error = %err, "failed to restore terminal");
        }
    }
}

/// Leaves raw mode and writes the escape sequences that undo set-up
///
/// Every step runs even if an earlier one fails; the first error wins.
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show);
    raw.and(screen)
}

/// Execute the run command
///
/// The terminal is restored even when set-up or the loop fails.
pub fn execute_run(config: &CliConfig) -> CliResult<()> {
    let mut app = CalculatorApp::from_session(config.session());
    info!(variant = %config.variant, theme = %config.theme, "starting terminal UI");

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run_app(&mut terminal, &mut app);
    drop(terminal);
    drop(guard);

    info!(history = app.session().history().len(), "terminal UI closed");
    result
}

/// Draw, wait for one event, dispatch; until the app asks to quit
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> CliResult<()> {
    while !app.should_quit() {
        terminal.draw(|frame| render(app, frame))?;
        let event = event::read()?;
        let size = terminal.size()?;
        app.handle_event(&event, Rect::new(0, 0, size.width, size.height));
    }
    Ok(())
}
