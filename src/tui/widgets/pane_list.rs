//! Scrolling list pane used for projects, seq/shot nodes and files

use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// One row of a pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneRow {
    /// Leading indentation level (0 or 1)
    pub depth: usize,
    /// Text to show
    pub label: String,
    /// Whether the session currently has this entry selected
    pub committed: bool,
}

impl PaneRow {
    /// Create a row
    #[must_use]
    pub fn new(label: impl Into<String>, depth: usize, committed: bool) -> Self {
        Self {
            depth,
            label: label.into(),
            committed,
        }
    }
}

/// List pane widget with a cursor and committed-selection marker
pub struct PaneList<'a> {
    title: String,
    rows: &'a [PaneRow],
    cursor: usize,
    focused: bool,
    empty_hint: &'a str,
    theme: &'a Theme,
}

impl<'a> PaneList<'a> {
    /// Create a pane
    #[must_use]
    pub fn new(title: impl Into<String>, rows: &'a [PaneRow], cursor: usize, theme: &'a Theme) -> Self {
        Self {
            title: title.into(),
            rows,
            cursor,
            focused: false,
            empty_hint: "(empty)",
            theme,
        }
    }

    /// Mark the pane as focused
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Text shown when there are no rows
    #[must_use]
    pub const fn empty_hint(mut self, hint: &'a str) -> Self {
        self.empty_hint = hint;
        self
    }

    /// First visible row so the cursor stays on screen
    const fn scroll_offset(cursor: usize, height: usize) -> usize {
        if height == 0 || cursor < height {
            0
        } else {
            cursor + 1 - height
        }
    }

    fn render_row(&self, row: &PaneRow, is_cursor: bool) -> ListItem<'a> {
        let marker = if row.committed { "● " } else { "  " };
        let indent = "  ".repeat(row.depth);
        let text_style = if row.committed {
            self.theme.committed_style()
        } else {
            ratatui::style::Style::default()
        };

        let line = Line::from(vec![
            Span::styled(marker, self.theme.committed_style()),
            Span::raw(indent),
            Span::styled(row.label.clone(), text_style),
        ]);

        if is_cursor && self.focused {
            ListItem::new(line).style(self.theme.cursor_style())
        } else {
            ListItem::new(line)
        }
    }
}

impl Widget for PaneList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused))
            .title(format!(" {} ({}) ", self.title, self.rows.len()));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.rows.is_empty() {
            Line::styled(self.empty_hint, self.theme.dimmed_style()).render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let start = Self::scroll_offset(self.cursor, height);
        let end = (start + height).min(self.rows.len());

        let items: Vec<ListItem> = (start..end)
            .map(|idx| self.render_row(&self.rows[idx], idx == self.cursor))
            .collect();

        List::new(items).render(inner, buf);
    }
}
