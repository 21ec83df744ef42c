//! Status bar widget for displaying advisories and launch results

use crate::output::MessageLevel;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar widget that displays the latest message and the resolved path
pub struct StatusBar<'a> {
    /// Latest unexpired message
    message: Option<&'a (MessageLevel, String)>,
    /// Directory a launch would target, if resolvable
    target: Option<&'a str>,
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget
    #[must_use]
    pub const fn new(message: Option<&'a (MessageLevel, String)>, theme: &'a Theme) -> Self {
        Self {
            message,
            target: None,
            theme,
        }
    }

    /// Show the launch target on the right-hand side
    #[must_use]
    pub const fn with_target(mut self, target: Option<&'a str>) -> Self {
        self.target = target;
        self
    }

    /// Get prefix for a message level
    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
            MessageLevel::Normal => "",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false))
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);

        if let Some((level, text)) = self.message {
            let style = self.theme.level_style(*level);
            let line = Line::from(vec![
                Span::styled(Self::prefix_for_level(*level), style),
                Span::styled(text.as_str(), style),
            ]);
            Paragraph::new(line).render(chunks[0], buf);
        }

        if let Some(target) = self.target {
            Paragraph::new(Line::styled(target, self.theme.dimmed_style()))
                .alignment(ratatui::layout::Alignment::Right)
                .render(chunks[1], buf);
        }
    }
}
