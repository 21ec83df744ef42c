//! Color theme definitions for the ratatui TUI

use crate::output::MessageLevel;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the cursor row
    pub selection_bg: Color,
    /// Foreground color for the cursor row
    pub selection_fg: Color,
    /// Color for committed selections
    pub committed: Color,
    /// Color for success messages
    pub success: Color,
    /// Color for error messages
    pub error: Color,
    /// Color for warning messages
    pub warning: Color,
    /// Color for info messages
    pub info: Color,
    /// Color for unfocused borders
    pub border: Color,
    /// Color for the focused pane border
    pub focused_border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    /// Color for the role badge
    pub role: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            committed: Color::Green,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            focused_border: Color::Cyan,
            dimmed: Color::DarkGray,
            role: Color::Magenta,
        }
    }

    /// Style for the row under the cursor
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the entry the session has selected
    #[must_use]
    pub fn committed_style(&self) -> Style {
        Style::default().fg(self.committed).add_modifier(Modifier::BOLD)
    }

    /// Style for a pane border
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focused_border)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for key names in hints
    #[must_use]
    pub fn key_style(&self) -> Style {
        Style::default().fg(self.info).add_modifier(Modifier::BOLD)
    }

    /// Style for the role badge
    #[must_use]
    pub fn role_style(&self) -> Style {
        Style::default().fg(self.role).add_modifier(Modifier::BOLD)
    }

    /// Style for a status message level
    #[must_use]
    pub fn level_style(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => Style::default().fg(self.success),
            MessageLevel::Error => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
            MessageLevel::Warning => Style::default().fg(self.warning),
            MessageLevel::Info => Style::default().fg(self.info),
            MessageLevel::Normal => Style::default(),
        }
    }
}
