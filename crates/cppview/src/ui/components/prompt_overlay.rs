use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::domain::input::InputState;
use crate::ui::Component;
use crate::ui::state::help_action;
use crate::ui::util::centered_rect;

const OVERLAY_HEIGHT: u16 = 5;
const OVERLAY_WIDTH_PERCENT: u16 = 50;
const MIN_OVERLAY_WIDTH: u16 = 30;
const INPUT_PREFIX: &str = " › ";

/// Centered single-line name prompt with a visible cursor.
pub struct PromptOverlay<'a> {
    context: String,
    input: &'a InputState,
    title: &'a str,
}

impl<'a> PromptOverlay<'a> {
    /// Creates a prompt titled `title`; `context` names where the result goes.
    pub fn new(title: &'a str, context: String, input: &'a InputState) -> Self {
        Self {
            context,
            input,
            title,
        }
    }
}

impl Component for PromptOverlay<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let width = (area.width * OVERLAY_WIDTH_PERCENT / 100).max(MIN_OVERLAY_WIDTH);
        let popup_area = centered_rect(area, width, OVERLAY_HEIGHT);

        let lines = vec![
            Line::from(Span::styled(
                self.context.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![
                Span::styled(
                    INPUT_PREFIX,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(self.input.text().to_string()),
            ]),
            Line::from(Span::styled(
                help_action::footer_text(&help_action::prompt_footer_actions()),
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    format!(" {} ", self.title),
                    Style::default().fg(Color::Cyan),
                )),
        );

        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);

        let before_cursor: String = self.input.text().chars().take(self.input.cursor).collect();
        let cursor_column = u16::try_from(INPUT_PREFIX.width() + before_cursor.width())
            .unwrap_or(u16::MAX);
        let cursor_x = popup_area
            .x
            .saturating_add(1)
            .saturating_add(cursor_column)
            .min(popup_area.right().saturating_sub(2));
        f.set_cursor_position(Position::new(cursor_x, popup_area.y + 2));
    }
}
