use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::domain::pairing::NewItemKind;
use crate::runtime::EventResult;

/// Handles key input while the tree has focus.
pub(crate) async fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return quit(app);
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            return quit(app);
        }
        KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Char('n') => app.begin_new_item(NewItemKind::Folder),
        KeyCode::Char('g') => app.begin_new_item(NewItemKind::Group),
        KeyCode::PageDown => app.move_selection(10),
        KeyCode::PageUp => app.move_selection(-10),
        KeyCode::Down => app.scroll_primary_view(1),
        KeyCode::Up => app.scroll_primary_view(-1),
        KeyCode::Enter => app.activate_selected().await,
        KeyCode::Char('l') | KeyCode::Right => app.expand_selected().await,
        KeyCode::Char('h') | KeyCode::Left => app.collapse_selected().await,
        KeyCode::Char('r') => app.begin_rename().await,
        KeyCode::Char('d') => app.begin_delete().await,
        KeyCode::Char('R') => app.refresh().await,
        _ => {}
    }

    EventResult::Continue
}

fn quit(app: &App) -> EventResult {
    app.request_shutdown();

    EventResult::Quit
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::app::tree::CppTreeProvider;
    use crate::infra::fs::RealFileSystem;
    use crate::ui::state::app_mode::{AppMode, PromptPurpose};

    async fn new_test_app(root: &Path) -> App {
        let provider = CppTreeProvider::new(Arc::new(RealFileSystem), root.to_path_buf());
        let mut app = App::new(provider);
        app.refresh().await;

        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_handle_q_quits_and_cancels_work() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let mut app = new_test_app(temp_dir.path()).await;

        // Act
        let event_result = handle(&mut app, key(KeyCode::Char('q'))).await;

        // Assert
        assert!(matches!(event_result, EventResult::Quit));
        assert!(app.is_shutting_down());
    }

    #[tokio::test]
    async fn test_handle_j_and_k_move_selection() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        fs::write(temp_dir.path().join("a.txt"), "").expect("test expectation should hold");
        fs::write(temp_dir.path().join("b.txt"), "").expect("test expectation should hold");
        let mut app = new_test_app(temp_dir.path()).await;

        // Act
        handle(&mut app, key(KeyCode::Char('j'))).await;
        let after_down = app.selected_index;
        handle(&mut app, key(KeyCode::Char('j'))).await;
        let after_second_down = app.selected_index;
        handle(&mut app, key(KeyCode::Char('k'))).await;

        // Assert
        assert_eq!(after_down, 1);
        assert_eq!(after_second_down, 1);
        assert_eq!(app.selected_index, 0);
    }

    #[tokio::test]
    async fn test_handle_g_opens_group_prompt() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let mut app = new_test_app(temp_dir.path()).await;

        // Act
        let event_result = handle(&mut app, key(KeyCode::Char('g'))).await;

        // Assert
        assert!(matches!(event_result, EventResult::Continue));
        assert!(matches!(
            app.mode,
            AppMode::Prompt {
                purpose: PromptPurpose::NewItem {
                    kind: NewItemKind::Group,
                    ..
                },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_handle_r_prefills_stem_for_paired_file() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        fs::create_dir_all(temp_dir.path().join("include")).expect("test expectation should hold");
        fs::create_dir_all(temp_dir.path().join("cpp")).expect("test expectation should hold");
        fs::write(temp_dir.path().join("include/foo.h"), "").expect("test expectation should hold");
        fs::write(temp_dir.path().join("cpp/foo.cpp"), "").expect("test expectation should hold");
        let mut app = new_test_app(temp_dir.path()).await;
        handle(&mut app, key(KeyCode::Char('j'))).await;
        handle(&mut app, key(KeyCode::Char('l'))).await;
        handle(&mut app, key(KeyCode::Char('j'))).await;

        // Act
        handle(&mut app, key(KeyCode::Char('r'))).await;

        // Assert
        assert!(matches!(
            &app.mode,
            AppMode::Prompt { input, .. } if input.text() == "foo"
        ));
    }

    #[tokio::test]
    async fn test_handle_d_opens_confirmation_with_sibling() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        fs::create_dir_all(temp_dir.path().join("include")).expect("test expectation should hold");
        fs::create_dir_all(temp_dir.path().join("cpp")).expect("test expectation should hold");
        let mut app = new_test_app(temp_dir.path()).await;

        // Act
        handle(&mut app, key(KeyCode::Char('d'))).await;

        // Assert
        assert!(matches!(
            app.mode,
            AppMode::ConfirmDelete {
                sibling: None,
                selected_yes: false,
                ..
            }
        ));
    }
}
