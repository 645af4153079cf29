//! Terminal runtime: setup, the event loop, and per-mode key handling.

use std::io;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::App;
use crate::infra::watcher::{self, FileChangeEvent};
use crate::ui;

mod event;
mod key_handler;
pub mod mode;
pub mod print;
mod terminal;

pub(crate) type TuiTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub(crate) enum EventResult {
    Continue,
    Quit,
}

/// Runs the TUI event/render loop until the user exits.
///
/// The workspace is watched recursively; when the watcher cannot start the
/// explorer still runs, without live updates.
///
/// # Errors
/// Returns an error if terminal setup, rendering, or event processing fails.
pub async fn run(app: &mut App) -> io::Result<()> {
    let (_watcher, mut change_rx) = match watcher::watch(app.workspace_root(), true) {
        Ok((watcher, change_rx)) => (Some(watcher), Some(change_rx)),
        Err(watch_error) => {
            warn!(%watch_error, "live updates disabled");

            (None, None)
        }
    };
    app.refresh().await;

    let _terminal_guard = terminal::TerminalGuard;
    let mut terminal = terminal::setup_terminal()?;

    // Crossterm reads block, so they run on a dedicated thread.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(event_tx);

    run_main_loop(app, &mut terminal, &mut event_rx, &mut change_rx).await?;

    terminal.show_cursor()?;
    info!("explorer closed");

    Ok(())
}

async fn run_main_loop(
    app: &mut App,
    terminal: &mut TuiTerminal,
    event_rx: &mut mpsc::UnboundedReceiver<crossterm::event::Event>,
    change_rx: &mut Option<mpsc::UnboundedReceiver<FileChangeEvent>>,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if matches!(
            event::process_events(app, event_rx, change_rx).await,
            EventResult::Quit
        ) {
            break;
        }
    }

    Ok(())
}
