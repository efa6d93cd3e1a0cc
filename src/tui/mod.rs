//! Terminal user interface built on ratatui
//!
//! Pages draw into the frame buffer; floating panels and dialogs draw into
//! overlay layers that are composited on top at the end of every frame.

mod app;
mod components;
mod context;
mod events;
mod keys;
mod listeners;
mod pages;
mod themes;
mod timer;
mod utils;

use crate::config::Config;
use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use tracing::info;

use app::App;
use events::{Event, EventHandler};

pub type Backend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;

/// Initialize the terminal for TUI mode
pub fn init_terminal(mouse: bool) -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main TUI entry point
pub async fn run(config: &Config) -> Result<()> {
    let mut terminal = init_terminal(config.ui.mouse_enabled)?;
    let viewport = terminal.size()?;
    let mut app = App::new(config, viewport);
    let mut event_handler = EventHandler::new(config.ui.tick_rate());
    setup_signal_handling(&event_handler);
    event_handler.send(Event::StatusMessage(format!(
        "Logging to {}",
        config.log_path().display()
    )))?;
    info!("TUI started at {}x{}", viewport.width, viewport.height);

    let result = run_app(&mut terminal, &mut app, &mut event_handler).await;

    restore_terminal(&mut terminal)?;
    result
}

/// Turn an external interrupt into a regular quit so the terminal is restored
fn setup_signal_handling(event_handler: &EventHandler) {
    let sender = event_handler.sender();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, shutting down gracefully");
            let _ = sender.send(Event::Quit);
        }
    });
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Some(event) = event_handler.next().await {
            if app.handle_event(event).await? {
                break;
            }
        }
    }
    Ok(())
}
