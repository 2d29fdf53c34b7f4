//! TUI module
//!
//! Provides the terminal console for the gateway.
//! Built with ratatui for a K9s-inspired experience.

mod app;
pub mod constants;
pub mod keybindings;
mod theme;
pub mod views;

pub use app::*;
pub use theme::*;

use crate::config::Config;
use crate::services::ConsoleSession;
use anyhow::Result;
use constants::INPUT_POLL_MS;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// Run the TUI application
pub async fn run_tui(mut session: ConsoleSession, config: Config, theme: Theme) -> Result<()> {
    tracing::debug!("Initializing TUI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.ui.enable_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let enable_mouse = config.ui.enable_mouse;
    let report = session.mount().await;
    let mut app = App::new(session, config, theme);
    if let Some((collection, error)) = report.failed.first() {
        app.set_status_message((
            format!("Failed to load {}: {}", collection, error.summary()),
            true,
        ));
    }

    tracing::debug!("TUI initialized, entering main loop");

    let result = run_loop(&mut terminal, &mut app);

    tracing::debug!("TUI shutting down");
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if enable_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        app.drain_events();

        // Handle input events (non-blocking)
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }
}
