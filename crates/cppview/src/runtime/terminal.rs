use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::warn;

use crate::runtime::TuiTerminal;

/// Hands the terminal back to the shell when the explorer exits.
///
/// The explorer draws the tree and document panes in the alternate screen
/// with the cursor hidden, showing it only while a name prompt is open. The
/// guard leaves the alternate screen and shows the cursor whichever state
/// the explorer was in. Cleanup lives in `Drop` so it also runs on early `?`
/// returns and while unwinding.
pub(crate) struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(restore_error) = restore_terminal() {
            warn!(%restore_error, "failed to restore terminal");
        }
    }
}

/// Enables raw mode, enters the alternate screen, and starts from a blank
/// frame with the cursor hidden.
pub(crate) fn setup_terminal() -> io::Result<TuiTerminal> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    Ok(terminal)
}

/// Undoes [`setup_terminal`]. Every step runs even when an earlier one
/// fails; the first error is returned.
fn restore_terminal() -> io::Result<()> {
    let raw_mode_result = disable_raw_mode();
    let screen_result = execute!(io::stdout(), LeaveAlternateScreen, Show);

    raw_mode_result.and(screen_result)
}
