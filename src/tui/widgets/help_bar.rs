//! Help bar widget for displaying keybind hints

use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "Tab", "r")
    pub key: String,
    /// Action description (e.g., "pane", "role")
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints shown in the launcher
    #[must_use]
    pub fn default_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "pane"),
            KeyHint::new("Enter", "select"),
            KeyHint::new("r", "role"),
            KeyHint::new("L", "launch"),
            KeyHint::new("?", "help"),
            KeyHint::new("q", "quit"),
        ]
    }

    /// Longer descriptions for the help overlay
    #[must_use]
    pub fn overlay_lines() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Tab / → / l", "focus next pane"),
            ("Shift-Tab / ← / h", "focus previous pane"),
            ("↑ ↓ / k j", "move cursor"),
            ("Enter", "select project, shot or file (again to clear file)"),
            ("r", "cycle role: none → maya → houdini → nuke"),
            ("L / F5", "launch selected file, or the shot's role directory"),
            ("? / F1", "toggle this help"),
            ("q / Esc", "quit"),
        ]
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.key_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
