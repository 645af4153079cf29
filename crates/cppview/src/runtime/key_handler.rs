use crossterm::event::{KeyEvent, KeyEventKind};

use crate::app::App;
use crate::runtime::{EventResult, mode};
use crate::ui::state::app_mode::AppMode;

pub(crate) async fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    if key.kind == KeyEventKind::Release {
        return EventResult::Continue;
    }

    match &app.mode {
        AppMode::Explorer => mode::explorer::handle(app, key).await,
        AppMode::Prompt { .. } => mode::prompt::handle(app, key).await,
        AppMode::ConfirmDelete { .. } => mode::delete_confirmation::handle(app, key).await,
    }
}
