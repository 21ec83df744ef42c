//! Keyboard handling for the TUI
//!
//! Maps key presses to [`Action`]s. The mapping is pure so the app can be
//! driven in tests without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User intent produced by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor up in the focused pane
    Up,
    /// Move the cursor down in the focused pane
    Down,
    /// Focus the pane to the right
    NextPane,
    /// Focus the pane to the left
    PrevPane,
    /// Select the entry under the cursor
    Select,
    /// Advance the role picker
    CycleRole,
    /// Launch the current selection
    Launch,
    /// Show or hide the help overlay
    ToggleHelp,
    /// Leave the launcher
    Quit,
}

/// Translate a key event into an action
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let action = match (key.code, key.modifiers) {
        (KeyCode::Esc | KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Up | KeyCode::Char('k'), _) => Action::Up,
        (KeyCode::Down | KeyCode::Char('j'), _) => Action::Down,
        (KeyCode::Tab | KeyCode::Right | KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextPane,
        (KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h'), _) => Action::PrevPane,
        (KeyCode::Enter, _) => Action::Select,
        (KeyCode::Char('r'), _) => Action::CycleRole,
        (KeyCode::Char('L') | KeyCode::F(5), _) => Action::Launch,
        (KeyCode::Char('?') | KeyCode::F(1), _) => Action::ToggleHelp,
        _ => return None,
    };
    Some(action)
}
