use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::runtime::EventResult;
use crate::ui::state::app_mode::AppMode;

/// Handles key input while delete confirmation is visible.
pub(crate) async fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    let AppMode::ConfirmDelete { selected_yes, .. } = &app.mode else {
        return EventResult::Continue;
    };
    let selected_yes = *selected_yes;

    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Tab => toggle_choice(app),
        KeyCode::Char('y') => confirm(app).await,
        KeyCode::Enter if selected_yes => confirm(app).await,
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('n' | 'q') => {
            app.mode = AppMode::Explorer;
        }
        _ => {}
    }

    EventResult::Continue
}

fn toggle_choice(app: &mut App) {
    if let AppMode::ConfirmDelete { selected_yes, .. } = &mut app.mode {
        *selected_yes = !*selected_yes;
    }
}

/// Leaves the confirmation and deletes the entry and its sibling.
async fn confirm(app: &mut App) {
    let mode = std::mem::take(&mut app.mode);
    if let AppMode::ConfirmDelete { entry, .. } = mode {
        app.delete(&entry).await;

        return;
    }

    app.mode = mode;
}
