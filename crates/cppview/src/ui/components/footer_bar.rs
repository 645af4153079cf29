use std::path::Path;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::Component;

/// Bottom bar with the workspace root and the latest status message.
pub struct FooterBar<'a> {
    status_message: Option<&'a str>,
    workspace_root: &'a Path,
}

impl<'a> FooterBar<'a> {
    pub fn new(workspace_root: &'a Path, status_message: Option<&'a str>) -> Self {
        Self {
            status_message,
            workspace_root,
        }
    }

    /// Returns the root with the home directory shortened to `~`.
    fn display_root(&self) -> String {
        if let Some(home) = dirs::home_dir()
            && let Ok(path) = self.workspace_root.strip_prefix(home)
        {
            return format!("~/{}", path.display());
        }

        self.workspace_root.display().to_string()
    }
}

impl Component for FooterBar<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!(" Workspace: {}", self.display_root()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::DIM),
        )];

        if let Some(status_message) = self.status_message {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                status_message.to_string(),
                Style::default().fg(Color::Yellow),
            ));
        }

        let footer = Paragraph::new(Line::from(spans))
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        f.render_widget(footer, area);
    }
}
