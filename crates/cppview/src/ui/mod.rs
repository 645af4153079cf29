pub mod components;
pub mod pages;
pub mod state;
pub mod util;

use std::path::Path;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::app::App;
use crate::domain::entry::Entry;
use crate::ui::state::app_mode::{AppMode, PromptPurpose};

/// A trait for UI pages that enforces a standard rendering interface.
pub trait Page {
    fn render(&mut self, f: &mut Frame, area: Rect);
}

/// A trait for UI components that enforces a standard rendering interface.
pub trait Component {
    fn render(&self, f: &mut Frame, area: Rect);
}

/// Draws the whole screen for the current app state.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    let outer_chunks = Layout::default()
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let content_area = outer_chunks[0];
    let footer_bar_area = outer_chunks[1];

    pages::explorer::ExplorerPage::new(
        &app.rows,
        app.selected_index,
        app.primary_view.as_ref(),
        app.secondary_view.as_ref(),
    )
    .render(f, content_area);

    components::footer_bar::FooterBar::new(app.workspace_root(), app.status_message.as_deref())
        .render(f, footer_bar_area);

    match &app.mode {
        AppMode::Explorer => {}
        AppMode::Prompt { purpose, input } => {
            components::prompt_overlay::PromptOverlay::new(
                purpose.title(),
                prompt_context(purpose, app.workspace_root()),
                input,
            )
            .render(f, content_area);
        }
        AppMode::ConfirmDelete {
            entry,
            sibling,
            selected_yes,
        } => {
            let details = std::iter::once(entry)
                .chain(sibling)
                .map(|entry| relative_display(entry, app.workspace_root()))
                .collect();
            components::confirmation_overlay::ConfirmationOverlay::new("Confirm Delete", details)
                .selected_yes(*selected_yes)
                .render(f, content_area);
        }
    }
}

/// Describes where a prompt's result lands, relative to the workspace.
fn prompt_context(purpose: &PromptPurpose, workspace_root: &Path) -> String {
    match purpose {
        PromptPurpose::NewItem { dir, .. } => {
            format!("in {}", relative_display(dir, workspace_root))
        }
        PromptPurpose::Rename(request) => match &request.sibling {
            Some(sibling) => format!(
                "{} and {}",
                relative_display(&request.target, workspace_root),
                relative_display(sibling, workspace_root)
            ),
            None => relative_display(&request.target, workspace_root),
        },
    }
}

fn relative_display(entry: &Entry, workspace_root: &Path) -> String {
    match entry.path.strip_prefix(workspace_root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => relative.display().to_string(),
        Err(_) => entry.path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::app::tree::CppTreeProvider;
    use crate::domain::entry::EntryKind;
    use crate::domain::input::InputState;
    use crate::domain::pairing::NewItemKind;
    use crate::infra::fs::RealFileSystem;

    fn draw(app: &App) -> String {
        let backend = ratatui::backend::TestBackend::new(140, 30);
        let mut terminal = ratatui::Terminal::new(backend).expect("test expectation should hold");
        terminal
            .draw(|frame| render(frame, app))
            .expect("test expectation should hold");

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[tokio::test]
    async fn test_render_prompt_mode_shows_target_directory() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        fs::create_dir(temp_dir.path().join("lib")).expect("test expectation should hold");
        let provider = CppTreeProvider::new(Arc::new(RealFileSystem), temp_dir.path().to_path_buf());
        let mut app = App::new(provider);
        app.refresh().await;
        app.mode = AppMode::Prompt {
            purpose: PromptPurpose::NewItem {
                dir: Entry::new(temp_dir.path().join("lib"), EntryKind::Directory),
                kind: NewItemKind::Group,
            },
            input: InputState::with_text("widget".to_string()),
        };

        // Act
        let text = draw(&app);

        // Assert
        assert!(text.contains("New Group"));
        assert!(text.contains("in lib"));
    }

    #[tokio::test]
    async fn test_render_delete_mode_lists_entry_and_sibling() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let provider = CppTreeProvider::new(Arc::new(RealFileSystem), temp_dir.path().to_path_buf());
        let mut app = App::new(provider);
        app.mode = AppMode::ConfirmDelete {
            entry: Entry::new(temp_dir.path().join("cpp/foo.cpp"), EntryKind::File),
            sibling: Some(Entry::new(
                temp_dir.path().join("include/foo.h"),
                EntryKind::File,
            )),
            selected_yes: false,
        };

        // Act
        let text = draw(&app);

        // Assert
        assert!(text.contains("Confirm Delete"));
        assert!(text.contains("cpp/foo.cpp"));
        assert!(text.contains("include/foo.h"));
    }

    #[test]
    fn test_relative_display_of_root_is_dot() {
        // Arrange
        let root = Path::new("/ws");
        let entry = Entry::new("/ws", EntryKind::Directory);

        // Act
        let display = relative_display(&entry, root);

        // Assert
        assert_eq!(display, ".");
    }
}
