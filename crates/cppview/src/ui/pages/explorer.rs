use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::DocumentView;
use crate::app::rows::VisibleRow;
use crate::domain::row::RowContext;
use crate::ui::Page;
use crate::ui::state::help_action;
use crate::ui::util::{format_size, format_timestamp};

const CONTENT_FOOTER_HEIGHT: u16 = 1;
const CONTENT_MARGIN: u16 = 1;
const COLLAPSED_MARKER: &str = "▸ ";
const EXPANDED_MARKER: &str = "▾ ";
const LEAF_MARKER: &str = "  ";
const GROUP_SUFFIX: &str = " {h,cpp}";
const INDENT: &str = "  ";
const EMPTY_VIEW_MESSAGE: &str = "Select a file or group and press Enter to open it.";

/// Tree on the left, primary and secondary documents on the right.
pub struct ExplorerPage<'a> {
    pub rows: &'a [VisibleRow],
    pub selected_index: usize,
    pub primary_view: Option<&'a DocumentView>,
    pub secondary_view: Option<&'a DocumentView>,
}

impl<'a> ExplorerPage<'a> {
    pub fn new(
        rows: &'a [VisibleRow],
        selected_index: usize,
        primary_view: Option<&'a DocumentView>,
        secondary_view: Option<&'a DocumentView>,
    ) -> Self {
        Self {
            rows,
            selected_index,
            primary_view,
            secondary_view,
        }
    }

    fn render_tree(&self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem<'_>> = if self.rows.is_empty() {
            vec![ListItem::new(Span::styled(
                "Empty workspace",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.rows.iter().map(tree_item).collect()
        };

        let mut list_state = ListState::default();
        if !self.rows.is_empty() {
            list_state.select(Some(self.selected_index.min(self.rows.len() - 1)));
        }

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(Span::styled(
                " Explorer ",
                Style::default().fg(Color::Cyan),
            )))
            .highlight_style(Style::default().bg(Color::DarkGray));
        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_documents(&self, f: &mut Frame, area: Rect) {
        let Some(primary_view) = self.primary_view else {
            let placeholder = Paragraph::new(EMPTY_VIEW_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(placeholder, area);

            return;
        };

        let Some(secondary_view) = self.secondary_view else {
            render_document(f, area, primary_view, Color::Yellow);

            return;
        };

        let panes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        render_document(f, panes[0], primary_view, Color::Yellow);
        render_document(f, panes[1], secondary_view, Color::Green);
    }
}

/// Builds one indented tree line with its expansion marker.
fn tree_item(row: &VisibleRow) -> ListItem<'static> {
    let indent = INDENT.repeat(row.depth);
    let marker = match (row.row.is_collapsible(), row.is_expanded) {
        (false, _) => LEAF_MARKER,
        (true, false) => COLLAPSED_MARKER,
        (true, true) => EXPANDED_MARKER,
    };
    let label = row.row.label.display_text();

    let (style, suffix) = if row.entry.is_dir() {
        (Style::default().fg(Color::Yellow), "/")
    } else if row.row.context == Some(RowContext::Group) {
        (
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            GROUP_SUFFIX,
        )
    } else if row.row.command.is_none() {
        (Style::default().fg(Color::Red), "")
    } else {
        (Style::default().fg(Color::White), "")
    };

    ListItem::new(Line::from(vec![
        Span::raw(format!("{indent}{marker}")),
        Span::styled(label, style),
        Span::styled(suffix, Style::default().fg(Color::DarkGray)),
    ]))
}

fn render_document(f: &mut Frame, area: Rect, view: &DocumentView, accent: Color) {
    let title = format!(
        " {} ({}, modified {}) ",
        view.path.display(),
        format_size(view.size),
        format_timestamp(view.modified_at)
    );
    let paragraph = Paragraph::new(view.content.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, Style::default().fg(accent))),
        )
        .scroll((view.scroll_offset, 0));
    f.render_widget(paragraph, area);
}

impl Page for ExplorerPage<'_> {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .constraints([
                Constraint::Min(0),
                Constraint::Length(CONTENT_FOOTER_HEIGHT),
            ])
            .margin(CONTENT_MARGIN)
            .split(area);
        let content_area = chunks[0];
        let footer_area = chunks[1];

        let content_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(content_area);
        self.render_tree(f, content_layout[0]);
        self.render_documents(f, content_layout[1]);

        let help_text =
            help_action::footer_text(&help_action::explorer_footer_actions(!self.rows.is_empty()));
        let help_message = Paragraph::new(help_text).style(Style::default().fg(Color::Gray));
        f.render_widget(help_message, footer_area);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::entry::{Entry, EntryKind};
    use crate::domain::row::{RowCommand, TreeRow};

    fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn rows_fixture() -> Vec<VisibleRow> {
        let header = PathBuf::from("/ws/lib/include/foo.h");
        let source = PathBuf::from("/ws/lib/cpp/foo.cpp");

        vec![
            VisibleRow {
                entry: Entry::new("/ws/lib", EntryKind::Directory),
                row: TreeRow::directory(&PathBuf::from("/ws/lib")),
                depth: 0,
                is_expanded: true,
            },
            VisibleRow {
                entry: Entry::new(header.clone(), EntryKind::File),
                row: TreeRow::group(
                    "foo".to_string(),
                    RowCommand::OpenFilesSplit(header, source),
                ),
                depth: 1,
                is_expanded: false,
            },
        ]
    }

    fn document(path: &str, content: &str) -> DocumentView {
        DocumentView {
            path: PathBuf::from(path),
            content: content.to_string(),
            size: 12,
            modified_at: 0,
            scroll_offset: 0,
        }
    }

    fn draw(page: &mut ExplorerPage<'_>) -> String {
        let backend = ratatui::backend::TestBackend::new(140, 30);
        let mut terminal = ratatui::Terminal::new(backend).expect("test expectation should hold");
        terminal
            .draw(|frame| {
                let area = frame.area();
                crate::ui::Page::render(page, frame, area);
            })
            .expect("test expectation should hold");

        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_render_shows_tree_markers_and_group_suffix() {
        // Arrange
        let rows = rows_fixture();
        let mut page = ExplorerPage::new(&rows, 1, None, None);

        // Act
        let text = draw(&mut page);

        // Assert
        assert!(text.contains("▾ lib/"));
        assert!(text.contains("▸ foo {h,cpp}"));
        assert!(text.contains(EMPTY_VIEW_MESSAGE));
        assert!(text.contains("r: rename"));
    }

    #[test]
    fn test_render_split_shows_both_documents() {
        // Arrange
        let rows = rows_fixture();
        let primary = document("/ws/lib/include/foo.h", "int foo();");
        let secondary = document("/ws/lib/cpp/foo.cpp", "int foo() { return 1; }");
        let mut page = ExplorerPage::new(&rows, 1, Some(&primary), Some(&secondary));

        // Act
        let text = draw(&mut page);

        // Assert
        assert!(text.contains("int foo();"));
        assert!(text.contains("int foo() { return 1; }"));
        assert!(text.contains("/ws/lib/cpp/foo.cpp (12 B"));
    }

    #[test]
    fn test_render_empty_workspace_hides_item_actions() {
        // Arrange
        let rows = Vec::new();
        let mut page = ExplorerPage::new(&rows, 0, None, None);

        // Act
        let text = draw(&mut page);

        // Assert
        assert!(text.contains("Empty workspace"));
        assert!(!text.contains("d: delete"));
    }
}
