//! Ratatui widgets for the launcher TUI

mod help_bar;
mod pane_list;
mod status_bar;

pub use help_bar::{HelpBar, KeyHint};
pub use pane_list::{PaneList, PaneRow};
pub use status_bar::StatusBar;
