use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::app::App;
use crate::runtime::EventResult;
use crate::ui::state::app_mode::{AppMode, PromptPurpose};

/// Handles key input while a name prompt is open.
pub(crate) async fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter => submit(app).await,
        KeyCode::Esc => {
            debug!("prompt cancelled");
            app.mode = AppMode::Explorer;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.mode = AppMode::Explorer;
        }
        code => edit_input(app, code),
    }

    EventResult::Continue
}

/// Leaves the prompt and applies the entered name to its purpose.
async fn submit(app: &mut App) {
    let mode = std::mem::take(&mut app.mode);
    if let AppMode::Prompt { purpose, input } = mode {
        match purpose {
            PromptPurpose::NewItem { dir, kind } => {
                app.create_item(&dir, kind, input.text()).await;
            }
            PromptPurpose::Rename(request) => app.rename(&request, input.text()).await,
        }

        return;
    }

    app.mode = mode;
}

fn edit_input(app: &mut App, code: KeyCode) {
    let AppMode::Prompt { input, .. } = &mut app.mode else {
        return;
    };

    match code {
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Backspace => input.delete_backward(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Char(character) => input.insert_char(character),
        _ => {}
    }
}
