use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::ui::Component;
use crate::ui::util::{centered_rect, truncate_with_ellipsis};

const OVERLAY_HEIGHT: u16 = 8;
const OVERLAY_WIDTH_PERCENT: u16 = 50;
const MIN_OVERLAY_WIDTH: u16 = 30;

/// Centered Yes/No popup shown before deleting files.
///
/// Each detail line is truncated to one row so the choices stay visible.
pub struct ConfirmationOverlay<'a> {
    details: Vec<String>,
    selected_yes: bool,
    title: &'a str,
}

impl<'a> ConfirmationOverlay<'a> {
    pub fn new(title: &'a str, details: Vec<String>) -> Self {
        Self {
            details,
            selected_yes: false,
            title,
        }
    }

    /// Sets whether the "Yes" option is currently selected.
    #[must_use]
    pub fn selected_yes(mut self, yes: bool) -> Self {
        self.selected_yes = yes;
        self
    }
}

impl Component for ConfirmationOverlay<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let width = (area.width * OVERLAY_WIDTH_PERCENT / 100).max(MIN_OVERLAY_WIDTH);
        let popup_area = centered_rect(area, width, OVERLAY_HEIGHT);
        let detail_width = usize::from(popup_area.width.saturating_sub(4));

        let selected_option_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let unselected_option_style = Style::default().fg(Color::White);
        let (yes_option_style, no_option_style) = if self.selected_yes {
            (selected_option_style, unselected_option_style)
        } else {
            (unselected_option_style, selected_option_style)
        };

        let mut lines: Vec<Line<'_>> = self
            .details
            .iter()
            .map(|detail| {
                Line::from(Span::styled(
                    truncate_with_ellipsis(detail, detail_width),
                    Style::default().fg(Color::White),
                ))
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Yes ", yes_option_style),
            Span::raw("   "),
            Span::styled(" No ", no_option_style),
        ]));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(Span::styled(
                        format!(" {} ", self.title),
                        Style::default().fg(Color::Yellow),
                    )),
            );

        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_overlay_renders_details_and_choices() {
        // Arrange
        let backend = ratatui::backend::TestBackend::new(100, 20);
        let mut terminal = ratatui::Terminal::new(backend).expect("test expectation should hold");
        let overlay = ConfirmationOverlay::new(
            "Confirm Delete",
            vec!["cpp/foo.cpp".to_string(), "include/foo.h".to_string()],
        );

        // Act
        terminal
            .draw(|f| {
                let area = f.area();
                crate::ui::Component::render(&overlay, f, area);
            })
            .expect("test expectation should hold");

        // Assert
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("Confirm Delete"));
        assert!(text.contains("include/foo.h"));
        assert!(text.contains("Yes"));
        assert!(text.contains("No"));
    }

    #[test]
    fn test_confirmation_overlay_keeps_choices_for_long_details() {
        // Arrange
        let backend = ratatui::backend::TestBackend::new(40, 12);
        let mut terminal = ratatui::Terminal::new(backend).expect("test expectation should hold");
        let overlay = ConfirmationOverlay::new("Confirm Delete", vec!["x".repeat(200)])
            .selected_yes(true);

        // Act
        terminal
            .draw(|f| {
                let area = f.area();
                crate::ui::Component::render(&overlay, f, area);
            })
            .expect("test expectation should hold");

        // Assert
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("Yes"));
        assert!(text.contains('…'));
    }
}
