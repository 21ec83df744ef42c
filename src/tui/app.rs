//! Application state for the launcher TUI
//!
//! `App` owns the session and the per-pane cursors. Every user action goes
//! through [`App::apply`], which turns it into a session transition and
//! reports advisories or failures on the status bar.

use crate::config::LauncherConfig;
use crate::output::{OutputWriter, StatusBarWriter};
use crate::resolver::Role;
use crate::scanner::SeqShotRef;
use crate::session::LauncherSession;
use crate::tui::events::Action;
use crate::tui::widgets::PaneRow;
use crate::watcher::ChangeWatcher;

/// The three navigation panes, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Projects,
    SeqShots,
    Files,
}

impl Pane {
    const fn index(self) -> usize {
        match self {
            Self::Projects => 0,
            Self::SeqShots => 1,
            Self::Files => 2,
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Projects => Self::SeqShots,
            Self::SeqShots | Self::Files => Self::Files,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Projects | Self::SeqShots => Self::Projects,
            Self::Files => Self::SeqShots,
        }
    }
}

/// TUI state wrapped around a launcher session
pub struct App<W: ChangeWatcher> {
    session: LauncherSession<W>,
    config: LauncherConfig,
    focus: Pane,
    cursors: [usize; 3],
    status: StatusBarWriter,
    show_help: bool,
    should_quit: bool,
}

impl<W: ChangeWatcher> App<W> {
    /// Wrap a session whose roots are already set
    pub fn new(session: LauncherSession<W>, config: LauncherConfig) -> Self {
        let mut app = Self {
            session,
            config,
            focus: Pane::default(),
            cursors: [0; 3],
            status: StatusBarWriter::new(),
            show_help: false,
            should_quit: false,
        };
        app.flush_advisories();
        app
    }

    #[must_use]
    pub const fn session(&self) -> &LauncherSession<W> {
        &self.session
    }

    #[must_use]
    pub const fn config(&self) -> &LauncherConfig {
        &self.config
    }

    #[must_use]
    pub const fn focus(&self) -> Pane {
        self.focus
    }

    #[must_use]
    pub const fn cursor(&self, pane: Pane) -> usize {
        self.cursors[pane.index()]
    }

    #[must_use]
    pub const fn status(&self) -> &StatusBarWriter {
        &self.status
    }

    #[must_use]
    pub const fn show_help(&self) -> bool {
        self.show_help
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle one user action
    pub fn apply(&mut self, action: Action) {
        if self.show_help && !matches!(action, Action::ToggleHelp | Action::Quit) {
            return;
        }

        match action {
            Action::Up => self.move_cursor(-1),
            Action::Down => self.move_cursor(1),
            Action::NextPane => self.focus = self.focus.next(),
            Action::PrevPane => self.focus = self.focus.prev(),
            Action::Select => self.select_under_cursor(),
            Action::CycleRole => self.cycle_role(),
            Action::Launch => self.launch(),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Quit => self.should_quit = true,
        }

        self.clamp_cursors();
        self.flush_advisories();
    }

    /// Apply pending filesystem changes
    ///
    /// Called once per frame. Cursors are clamped in case a listing shrank.
    pub fn tick(&mut self) {
        let rescanned = self.session.pump_watcher();
        if rescanned > 0 {
            self.clamp_cursors();
        }
        self.flush_advisories();
    }

    /// Rows of the projects pane
    #[must_use]
    pub fn project_rows(&self) -> Vec<PaneRow> {
        let current = self.session.selection().project();
        self.session
            .projects()
            .iter()
            .map(|name| PaneRow::new(name.as_str(), 0, current == Some(name.as_str())))
            .collect()
    }

    /// Rows of the seq/shot pane; sequence groups end with a slash
    #[must_use]
    pub fn seq_shot_rows(&self) -> Vec<PaneRow> {
        let selection = self.session.selection();
        self.seq_shot_refs()
            .into_iter()
            .map(|node| {
                let committed = selection.shot() == Some(node.name.as_str())
                    && selection.sequence() == node.parent.as_deref();
                let depth = usize::from(node.parent.is_some());
                let label = if node.is_listable() {
                    node.name
                } else {
                    format!("{}/", node.name)
                };
                PaneRow::new(label, depth, committed)
            })
            .collect()
    }

    /// Rows of the files pane
    #[must_use]
    pub fn file_rows(&self) -> Vec<PaneRow> {
        let current = self.session.selection().selected_file();
        self.session
            .files()
            .iter()
            .map(|name| PaneRow::new(name.as_str(), 0, current == Some(name.as_str())))
            .collect()
    }

    /// Hint for the files pane when it has nothing to show
    #[must_use]
    pub fn files_hint(&self) -> &'static str {
        let selection = self.session.selection();
        if selection.role().is_none() {
            "press r to pick a role"
        } else if selection.shot().is_none() {
            "select a shot"
        } else if selection.shot_path().is_none() {
            "select a shot inside the sequence"
        } else {
            "(no files)"
        }
    }

    /// Directory a launch would target, for the status bar
    #[must_use]
    pub fn launch_target(&self) -> Option<String> {
        self.session
            .selection()
            .resolved_file_path()
            .ok()
            .map(|path| path.display().to_string())
    }

    fn seq_shot_refs(&self) -> Vec<SeqShotRef> {
        self.session.seq_shot_tree().flatten()
    }

    fn pane_len(&self, pane: Pane) -> usize {
        match pane {
            Pane::Projects => self.session.projects().len(),
            Pane::SeqShots => self.seq_shot_refs().len(),
            Pane::Files => self.session.files().len(),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.pane_len(self.focus);
        if len == 0 {
            return;
        }
        let cursor = &mut self.cursors[self.focus.index()];
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn clamp_cursors(&mut self) {
        for pane in [Pane::Projects, Pane::SeqShots, Pane::Files] {
            let len = self.pane_len(pane);
            let cursor = &mut self.cursors[pane.index()];
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }

    fn select_under_cursor(&mut self) {
        let cursor = self.cursor(self.focus);
        let result = match self.focus {
            Pane::Projects => {
                let Some(name) = self.session.projects().get(cursor).cloned() else {
                    return;
                };
                self.cursors[Pane::SeqShots.index()] = 0;
                self.cursors[Pane::Files.index()] = 0;
                self.session.select_project(&name).map(|()| self.focus = Pane::SeqShots)
            }
            Pane::SeqShots => {
                let Some(node) = self.seq_shot_refs().into_iter().nth(cursor) else {
                    return;
                };
                self.cursors[Pane::Files.index()] = 0;
                self.session.select_seq_shot(&node).map(|()| {
                    if !self.session.files().is_empty() {
                        self.focus = Pane::Files;
                    }
                })
            }
            Pane::Files => {
                let Some(name) = self.session.files().get(cursor).cloned() else {
                    return;
                };
                let already = self.session.selection().selected_file() == Some(name.as_str());
                let choice = if already { None } else { Some(name.as_str()) };
                self.session.select_file(choice)
            }
        };

        if let Err(e) = result {
            self.status.report(&e);
        }
    }

    fn cycle_role(&mut self) {
        let next = Role::cycle(self.session.selection().role());
        match self.session.select_role(next) {
            Ok(()) => match next {
                Some(role) => self.status.info(&format!("Role: {role}")),
                None => self.status.info("Role cleared"),
            },
            Err(e) => self.status.report(&e),
        }
    }

    fn launch(&mut self) {
        let role = self.session.selection().role();
        match self.session.launch(&self.config) {
            Ok(pid) => {
                let role = role.map_or("application", Role::as_str);
                self.status.success(&format!("Launched {role} (pid {pid})"));
            }
            Err(e) => {
                tracing::error!(error = %e, "launch failed");
                self.status.report(&e);
            }
        }
    }

    fn flush_advisories(&mut self) {
        for advisory in self.session.take_advisories() {
            self.status.report(&advisory);
        }
    }
}
