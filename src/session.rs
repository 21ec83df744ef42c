//! Launcher session: selection state and navigation transitions
//!
//! This module implements the hub of the launcher. The presentation layer
//! pushes user actions in as transitions; each transition rescans the level
//! below it and registers the directories it read with the change watcher.
//!
//! # Workflow
//!
//! ```text
//! Empty
//!   ↓ set_roots
//! RootSet ──────────────┐
//!   ↓ select_project    │ select_role (any time after RootSet)
//! ProjectSelected       │
//!   ↓ select_seq_shot   │
//! SeqShotSelected ←─────┤
//!   ↓ (role set, node is a shot)
//! FileListed ←──────────┘
//! ```
//!
//! Recoverable problems (missing directories, no role yet) never fail a
//! transition. They are queued as advisories for the caller to show, and
//! the affected listing is left empty.

use crate::config::LauncherConfig;
use crate::launch::{self, LaunchPlan};
use crate::resolver::{self, Role};
use crate::scanner::{self, SeqShotRef, SeqShotTree};
use crate::watcher::ChangeWatcher;
use crate::{LauncherError, Result};
use std::path::{Path, PathBuf};

/// Navigation state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SessionState {
    /// Nothing configured yet
    #[default]
    Empty,
    /// Roots known, projects listed
    RootSet,
    /// Project chosen, seq/shot tree listed
    ProjectSelected,
    /// Seq/shot node chosen, no file listing yet
    SeqShotSelected,
    /// Role directory of the chosen shot listed
    FileListed,
}

/// The current selection
///
/// Only the session mutates it. The role directory is derived on every read
/// and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    root_path: Option<PathBuf>,
    publish_root_path: Option<PathBuf>,
    project: Option<String>,
    sequence: Option<String>,
    shot: Option<String>,
    role: Option<Role>,
    selected_file: Option<String>,
    /// Whether the selected node is a shot rather than a sequence group
    listable: bool,
}

impl Selection {
    #[must_use]
    pub fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }

    #[must_use]
    pub fn publish_root_path(&self) -> Option<&Path> {
        self.publish_root_path.as_deref()
    }

    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    #[must_use]
    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_deref()
    }

    #[must_use]
    pub fn shot(&self) -> Option<&str> {
        self.shot.as_deref()
    }

    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    #[must_use]
    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    /// Absolute path of the selected project
    #[must_use]
    pub fn project_path(&self) -> Option<PathBuf> {
        Some(self.root_path.as_ref()?.join(self.project.as_ref()?))
    }

    /// Directory holding the role folders of the selected shot
    #[must_use]
    pub fn shot_path(&self) -> Option<PathBuf> {
        if !self.listable {
            return None;
        }
        Some(resolver::shot_dir(
            self.root_path.as_ref()?,
            self.project.as_ref()?,
            self.sequence.as_deref(),
            self.shot.as_ref()?,
        ))
    }

    /// Role directory the file listing reflects
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::PathUnavailable` unless a root, project, shot
    /// node and role are all set and the node is a shot.
    pub fn resolved_file_path(&self) -> Result<PathBuf> {
        let root = self.root_path.as_deref().unwrap_or_else(|| Path::new(""));
        if !self.listable {
            return Err(LauncherError::PathUnavailable(
                self.project_path().unwrap_or_else(|| root.to_path_buf()),
            ));
        }
        resolver::resolve_file_path(
            root,
            self.project.as_deref(),
            self.sequence.as_deref(),
            self.shot.as_deref(),
            self.role,
        )
    }
}

/// Stateful navigation over the studio hierarchy
pub struct LauncherSession<W: ChangeWatcher> {
    watcher: W,
    selection: Selection,
    state: SessionState,
    projects: Vec<String>,
    tree: SeqShotTree,
    files: Vec<String>,
    file_listings: usize,
    advisories: Vec<LauncherError>,
}

impl<W: ChangeWatcher> LauncherSession<W> {
    /// Create an empty session around a watcher
    pub fn new(watcher: W) -> Self {
        Self {
            watcher,
            selection: Selection::default(),
            state: SessionState::Empty,
            projects: Vec::new(),
            tree: SeqShotTree::default(),
            files: Vec::new(),
            file_listings: 0,
            advisories: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Project names under the root, sorted
    #[must_use]
    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    /// Seq/shot tree of the selected project
    #[must_use]
    pub const fn seq_shot_tree(&self) -> &SeqShotTree {
        &self.tree
    }

    /// Files in the resolved role directory, sorted, without dot-files
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// How many file listings this session has produced
    #[must_use]
    pub const fn file_listing_count(&self) -> usize {
        self.file_listings
    }

    #[must_use]
    pub const fn watcher(&self) -> &W {
        &self.watcher
    }

    pub fn watcher_mut(&mut self) -> &mut W {
        &mut self.watcher
    }

    /// Drain queued advisories for display
    pub fn take_advisories(&mut self) -> Vec<LauncherError> {
        std::mem::take(&mut self.advisories)
    }

    /// Set the projects and publish roots
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::InvalidState` unless the session is empty, and
    /// `LauncherError::PathUnavailable` if `root` is empty.
    pub fn set_roots(&mut self, root: impl Into<PathBuf>, publish_root: Option<PathBuf>) -> Result<()> {
        if self.state != SessionState::Empty {
            return Err(LauncherError::InvalidState("roots are already set".to_string()));
        }
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(LauncherError::PathUnavailable(root));
        }

        tracing::info!(root = %root.display(), "roots set");
        self.selection.root_path = Some(root.clone());
        self.selection.publish_root_path = publish_root;
        self.state = SessionState::RootSet;

        self.watch(&root);
        self.rescan_projects();
        Ok(())
    }

    /// Select a project and list its seq/shot tree
    ///
    /// Clears the sequence, shot, file selection and file listing first.
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::InvalidState` before roots are set.
    pub fn select_project(&mut self, name: &str) -> Result<()> {
        self.require(SessionState::RootSet, "select a project")?;

        tracing::info!(project = name, "project selected");
        self.selection.project = Some(name.to_string());
        self.clear_seq_shot();
        self.tree = SeqShotTree::default();
        self.state = SessionState::ProjectSelected;

        self.rescan_tree();
        Ok(())
    }

    /// Select a node of the seq/shot tree
    ///
    /// Without a role, a `NoRoleSelected` advisory is queued and the node is
    /// remembered so a later [`select_role`](Self::select_role) lists it.
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::InvalidState` before a project is selected.
    pub fn select_seq_shot(&mut self, node: &SeqShotRef) -> Result<()> {
        self.require(SessionState::ProjectSelected, "select a sequence or shot")?;

        tracing::info!(shot = %node.name, sequence = ?node.parent, "seq/shot selected");
        self.clear_seq_shot();
        self.selection.shot = Some(node.name.clone());
        self.selection.sequence = node.parent.clone();
        self.selection.listable = node.is_listable();
        self.state = SessionState::SeqShotSelected;

        if self.selection.role.is_none() {
            self.advisories.push(LauncherError::NoRoleSelected);
            return Ok(());
        }
        if self.selection.listable {
            self.relist_files();
        }
        Ok(())
    }

    /// Choose a role, or clear it with `None`
    ///
    /// If a shot is already selected its file listing is rebuilt from the
    /// new role directory; project, sequence and shot are kept.
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::InvalidState` before roots are set.
    pub fn select_role(&mut self, role: Option<Role>) -> Result<()> {
        self.require(SessionState::RootSet, "select a role")?;

        tracing::info!(role = ?role, "role selected");
        self.selection.role = role;

        if self.selection.shot.is_none() {
            return Ok(());
        }
        self.selection.selected_file = None;
        self.files.clear();
        self.state = SessionState::SeqShotSelected;

        if role.is_some() && self.selection.listable {
            self.relist_files();
        }
        Ok(())
    }

    /// Choose a file in the current listing, or `None` to launch the directory
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::InvalidState` unless files have been listed.
    pub fn select_file(&mut self, name: Option<&str>) -> Result<()> {
        self.require(SessionState::FileListed, "select a file")?;
        self.selection.selected_file = name.map(str::to_string);
        Ok(())
    }

    /// Rescan whichever listing was produced from `path`
    ///
    /// The selection itself is left untouched. Returns whether any listing
    /// was rebuilt.
    pub fn on_watched_directory_changed(&mut self, path: &Path) -> bool {
        let mut rescanned = false;

        if self.selection.root_path.as_deref() == Some(path) {
            self.rescan_projects();
            rescanned = true;
        }

        if self.state >= SessionState::ProjectSelected && self.tree_depends_on(path) {
            self.rescan_tree();
            rescanned = true;
        }

        if self.selection.role.is_some() && self.files_depend_on(path) {
            self.relist_files();
            rescanned = true;
        }

        if rescanned {
            tracing::debug!(path = %path.display(), "refreshed after change");
        }
        rescanned
    }

    /// Apply every change the watcher has queued
    ///
    /// Returns the number of directories that triggered a rescan.
    pub fn pump_watcher(&mut self) -> usize {
        let changed = self.watcher.drain();
        changed
            .iter()
            .filter(|path| self.on_watched_directory_changed(path))
            .count()
    }

    /// Assemble the launch for the current selection without spawning
    ///
    /// Skipped environment-definition lines are queued as advisories.
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::NoRoleSelected` without a role and
    /// `LauncherError::PathUnavailable` without a resolvable shot.
    pub fn launch_plan(&mut self, config: &LauncherConfig) -> Result<LaunchPlan> {
        let mut plan = launch::build_launch(
            &self.selection,
            &config.executables,
            config.env_file.as_deref(),
        )?;
        self.advisories.append(&mut plan.warnings);
        Ok(plan)
    }

    /// Build the launch and start the application, returning its pid
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`launch_plan`](Self::launch_plan), or
    /// `LauncherError::IoError` if the process cannot be started.
    pub fn launch(&mut self, config: &LauncherConfig) -> Result<u32> {
        let plan = self.launch_plan(config)?;
        launch::spawn(&plan)
    }

    fn require(&self, minimum: SessionState, action: &str) -> Result<()> {
        if self.state < minimum {
            return Err(LauncherError::InvalidState(format!(
                "cannot {action} in state {:?}",
                self.state
            )));
        }
        Ok(())
    }

    fn clear_seq_shot(&mut self) {
        self.selection.sequence = None;
        self.selection.shot = None;
        self.selection.selected_file = None;
        self.selection.listable = false;
        self.files.clear();
    }

    fn watch(&mut self, path: &Path) {
        if let Err(e) = self.watcher.watch(path) {
            tracing::warn!(path = %path.display(), error = %e, "cannot watch directory");
        }
    }

    fn tree_depends_on(&self, path: &Path) -> bool {
        self.selection.project_path().as_deref() == Some(path)
            || self.tree.visited.iter().any(|visited| visited == path)
    }

    fn files_depend_on(&self, path: &Path) -> bool {
        if self.selection.shot_path().as_deref() == Some(path) {
            return true;
        }
        self.selection
            .resolved_file_path()
            .is_ok_and(|resolved| resolved == path)
    }

    fn rescan_projects(&mut self) {
        let root = self.selection.root_path.clone();
        match scanner::list_subdirectories(root.as_deref()) {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "projects listed");
                self.projects = projects;
            }
            Err(e) => {
                self.projects.clear();
                self.advisories.push(e);
            }
        }
    }

    fn rescan_tree(&mut self) {
        let Some(project_path) = self.selection.project_path() else {
            return;
        };
        match scanner::scan_seq_shot_tree(&project_path) {
            Ok(tree) => {
                for visited in &tree.visited {
                    self.watch(visited);
                }
                tracing::debug!(nodes = tree.nodes.len(), "seq/shot tree listed");
                self.tree = tree;
            }
            Err(e) => {
                self.tree = SeqShotTree::default();
                self.advisories.push(e);
            }
        }
        self.refresh_listable();
    }

    /// Re-derive whether the selected node is a shot from the current tree
    ///
    /// A flat shot that gained nested shots becomes a sequence group (and the
    /// reverse). When that flips, the old listing no longer matches the
    /// selection and is rebuilt or dropped.
    fn refresh_listable(&mut self) {
        let Some(shot) = self.selection.shot.as_deref() else {
            return;
        };
        let listable = self
            .tree
            .row(self.selection.sequence.as_deref(), shot)
            .is_some_and(|row| row.is_listable());
        if listable == self.selection.listable {
            return;
        }

        tracing::debug!(shot, listable, "selected node changed kind");
        self.selection.listable = listable;
        self.selection.selected_file = None;
        self.files.clear();
        self.state = SessionState::SeqShotSelected;

        if listable && self.selection.role.is_some() {
            self.relist_files();
        }
    }

    fn relist_files(&mut self) {
        let resolved = match self.selection.resolved_file_path() {
            Ok(path) => path,
            Err(e) => {
                self.files.clear();
                self.advisories.push(e);
                return;
            }
        };

        if let Some(shot_path) = self.selection.shot_path() {
            self.watch(&shot_path);
        }
        self.watch(&resolved);

        self.file_listings += 1;
        self.state = SessionState::FileListed;
        match scanner::list_files(Some(&resolved)) {
            Ok(files) => {
                tracing::debug!(path = %resolved.display(), count = files.len(), "files listed");
                self.files = files;
            }
            Err(e) => {
                self.files.clear();
                self.advisories.push(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingWatcher, StudioTree, tree_row};
    use std::fs;

    fn studio() -> StudioTree {
        let studio = StudioTree::new();
        studio.file("p1/sq010/sh010/maya/sh010_anim_v001.ma");
        studio.file("p1/sq010/sh010/maya/.sh010_anim_v001.ma.swatches");
        studio.file("p1/sq010/sh010/nuke/sh010_comp_v003.nk");
        studio.dir("p1/sq010/sh020/maya");
        studio.file("p1/s1/nuke/shotA_comp.nk");
        studio.dir("p2/sq100/sh100");
        studio
    }

    fn session_at(studio: &StudioTree) -> LauncherSession<RecordingWatcher> {
        let mut session = LauncherSession::new(RecordingWatcher::default());
        session
            .set_roots(studio.root(), Some(PathBuf::from("/publish")))
            .unwrap();
        session
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = LauncherSession::new(RecordingWatcher::default());
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.selection(), &Selection::default());
    }

    #[test]
    fn test_set_roots_lists_projects_and_watches_root() {
        let studio = studio();
        let session = session_at(&studio);

        assert_eq!(session.state(), SessionState::RootSet);
        assert_eq!(session.projects(), ["p1", "p2"]);
        assert!(session.watcher().is_watching(studio.root()));
    }

    #[test]
    fn test_set_roots_only_from_empty() {
        let studio = studio();
        let mut session = session_at(&studio);
        let result = session.set_roots("/elsewhere", None);
        assert!(matches!(result, Err(LauncherError::InvalidState(_))));
        assert_eq!(session.selection().root_path(), Some(studio.root()));
    }

    #[test]
    fn test_set_roots_rejects_empty_root() {
        let mut session = LauncherSession::new(RecordingWatcher::default());
        assert!(matches!(
            session.set_roots("", None),
            Err(LauncherError::PathUnavailable(_))
        ));
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn test_transitions_out_of_order_are_rejected() {
        let mut session = LauncherSession::new(RecordingWatcher::default());
        assert!(session.select_project("p1").is_err());
        assert!(session.select_role(Some(Role::Maya)).is_err());

        let studio = studio();
        let mut session = session_at(&studio);
        assert!(session.select_seq_shot(&SeqShotRef::nested("sq010", "sh010")).is_err());
        assert!(session.select_file(Some("x.ma")).is_err());
    }

    #[test]
    fn test_select_project_scans_tree_and_watches_visited() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_project("p1").unwrap();

        assert_eq!(session.state(), SessionState::ProjectSelected);
        let rows = session.seq_shot_tree().flatten();
        assert_eq!(
            rows,
            vec![
                SeqShotRef::top_level("s1", true),
                SeqShotRef::top_level("sq010", false),
                SeqShotRef::nested("sq010", "sh010"),
                SeqShotRef::nested("sq010", "sh020"),
            ]
        );
        let watcher = session.watcher();
        assert!(watcher.is_watching(&studio.root().join("p1")));
        assert!(watcher.is_watching(&studio.root().join("p1/sq010")));
        assert!(watcher.is_watching(&studio.root().join("p1/s1")));
    }

    #[test]
    fn test_nested_shot_with_role_lists_files() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_role(Some(Role::Maya)).unwrap();
        session.select_project("p1").unwrap();
        let node = tree_row(&session, Some("sq010"), "sh010");
        session.select_seq_shot(&node).unwrap();

        assert_eq!(session.state(), SessionState::FileListed);
        assert_eq!(session.files(), ["sh010_anim_v001.ma"]);
        assert_eq!(session.selection().sequence(), Some("sq010"));
        assert_eq!(session.selection().shot(), Some("sh010"));
        let resolved = studio.root().join("p1/sq010/sh010/maya");
        assert_eq!(session.selection().resolved_file_path().unwrap(), resolved);
        assert!(session.watcher().is_watching(&resolved));
    }

    #[test]
    fn test_flat_shot_lists_files_without_sequence() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_role(Some(Role::Nuke)).unwrap();
        session.select_project("p1").unwrap();
        let node = tree_row(&session, None, "s1");
        session.select_seq_shot(&node).unwrap();

        assert_eq!(session.selection().sequence(), None);
        assert_eq!(session.files(), ["shotA_comp.nk"]);
        assert_eq!(
            session.selection().resolved_file_path().unwrap(),
            studio.root().join("p1/s1/nuke")
        );
    }

    #[test]
    fn test_sequence_group_does_not_list_files() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_role(Some(Role::Maya)).unwrap();
        session.select_project("p1").unwrap();
        let node = tree_row(&session, None, "sq010");
        session.select_seq_shot(&node).unwrap();

        assert_eq!(session.state(), SessionState::SeqShotSelected);
        assert!(session.files().is_empty());
        assert_eq!(session.file_listing_count(), 0);
        assert!(session.selection().resolved_file_path().is_err());
    }

    #[test]
    fn test_shot_before_role_is_remembered() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_project("p1").unwrap();
        let node = tree_row(&session, Some("sq010"), "sh010");
        session.select_seq_shot(&node).unwrap();

        assert_eq!(session.state(), SessionState::SeqShotSelected);
        assert!(session.files().is_empty());
        let advisories = session.take_advisories();
        assert!(matches!(advisories.as_slice(), [LauncherError::NoRoleSelected]));

        session.select_role(Some(Role::Nuke)).unwrap();
        assert_eq!(session.state(), SessionState::FileListed);
        assert_eq!(session.files(), ["sh010_comp_v003.nk"]);
        assert_eq!(session.selection().shot(), Some("sh010"));
    }

    #[test]
    fn test_role_change_relists_once_and_keeps_selection() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_role(Some(Role::Maya)).unwrap();
        session.select_project("p1").unwrap();
        let node = tree_row(&session, Some("sq010"), "sh010");
        session.select_seq_shot(&node).unwrap();
        session.select_file(Some("sh010_anim_v001.ma")).unwrap();
        let before = session.file_listing_count();

        session.select_role(Some(Role::Nuke)).unwrap();

        assert_eq!(session.file_listing_count(), before + 1);
        assert_eq!(session.files(), ["sh010_comp_v003.nk"]);
        assert_eq!(session.selection().project(), Some("p1"));
        assert_eq!(session.selection().sequence(), Some("sq010"));
        assert_eq!(session.selection().shot(), Some("sh010"));
        assert_eq!(session.selection().selected_file(), None);
    }

    #[test]
    fn test_clearing_role_drops_listing() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_role(Some(Role::Maya)).unwrap();
        session.select_project("p1").unwrap();
        let node = tree_row(&session, Some("sq010"), "sh010");
        session.select_seq_shot(&node).unwrap();

        session.select_role(None).unwrap();
        assert_eq!(session.state(), SessionState::SeqShotSelected);
        assert!(session.files().is_empty());
        assert_eq!(session.selection().shot(), Some("sh010"));
    }

    #[test]
    fn test_project_change_clears_lower_levels() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_role(Some(Role::Maya)).unwrap();
        session.select_project("p1").unwrap();
        let node = tree_row(&session, Some("sq010"), "sh010");
        session.select_seq_shot(&node).unwrap();
        session.select_file(Some("sh010_anim_v001.ma")).unwrap();

        session.select_project("p2").unwrap();

        let selection = session.selection();
        assert_eq!(selection.project(), Some("p2"));
        assert_eq!(selection.sequence(), None);
        assert_eq!(selection.shot(), None);
        assert_eq!(selection.selected_file(), None);
        assert_eq!(selection.role(), Some(Role::Maya));
        assert!(session.files().is_empty());
        assert_eq!(session.state(), SessionState::ProjectSelected);
        assert_eq!(session.seq_shot_tree().flatten()[0].name, "sq100");
    }

    #[test]
    fn test_missing_role_directory_is_advisory() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_role(Some(Role::Houdini)).unwrap();
        session.select_project("p1").unwrap();
        let node = tree_row(&session, Some("sq010"), "sh010");
        session.select_seq_shot(&node).unwrap();

        assert_eq!(session.state(), SessionState::FileListed);
        assert!(session.files().is_empty());
        let advisories = session.take_advisories();
        assert!(matches!(advisories.as_slice(), [LauncherError::PathUnavailable(_)]));
    }

    #[test]
    fn test_missing_project_directory_is_advisory() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_project("gone").unwrap();

        assert!(session.seq_shot_tree().nodes.is_empty());
        assert!(matches!(
            session.take_advisories().as_slice(),
            [LauncherError::PathUnavailable(_)]
        ));
    }

    #[test]
    fn test_new_project_appears_after_root_change() {
        let studio = studio();
        let mut session = session_at(&studio);
        studio.dir("p3");

        session.watcher_mut().touch(studio.root());
        assert_eq!(session.pump_watcher(), 1);
        assert_eq!(session.projects(), ["p1", "p2", "p3"]);
    }

    #[test]
    fn test_new_sequence_appears_after_project_change() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_project("p1").unwrap();
        studio.dir("p1/sq020/sh030");

        assert!(session.on_watched_directory_changed(&studio.root().join("p1")));

        let names: Vec<_> = session.seq_shot_tree().nodes.iter().map(|n| n.name.clone()).collect();
        assert_eq!(names, vec!["s1", "sq010", "sq020"]);
        assert!(session.watcher().is_watching(&studio.root().join("p1/sq020")));
    }

    #[test]
    fn test_new_shot_in_sequence_appears() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_project("p1").unwrap();
        studio.dir("p1/sq010/sh030");

        session.watcher_mut().touch(studio.root().join("p1/sq010"));
        session.pump_watcher();

        let sq010 = session.seq_shot_tree().find("sq010").unwrap();
        let shots: Vec<_> = sq010.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(shots, vec!["sh010", "sh020", "sh030"]);
    }

    #[test]
    fn test_flat_shot_turning_into_sequence_drops_listing() {
        let studio = studio();
        studio.file("p1/s9/nuke/s9_comp.nk");
        let mut session = session_at(&studio);
        session.select_role(Some(Role::Nuke)).unwrap();
        session.select_project("p1").unwrap();
        let node = tree_row(&session, None, "s9");
        session.select_seq_shot(&node).unwrap();
        assert_eq!(session.files(), ["s9_comp.nk"]);

        studio.dir("p1/s9/sh1");
        session.watcher_mut().touch(studio.root().join("p1/s9"));
        session.pump_watcher();

        assert!(!tree_row(&session, None, "s9").is_listable());
        assert_eq!(session.state(), SessionState::SeqShotSelected);
        assert!(session.files().is_empty());
        assert!(session.selection().resolved_file_path().is_err());
        assert_eq!(session.selection().shot(), Some("s9"));

        fs::remove_dir(studio.root().join("p1/s9/sh1")).unwrap();
        session.watcher_mut().touch(studio.root().join("p1/s9"));
        session.pump_watcher();

        assert_eq!(session.state(), SessionState::FileListed);
        assert_eq!(session.files(), ["s9_comp.nk"]);
    }

    #[test]
    fn test_new_file_appears_without_changing_selection() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_role(Some(Role::Maya)).unwrap();
        session.select_project("p1").unwrap();
        let node = tree_row(&session, Some("sq010"), "sh010");
        session.select_seq_shot(&node).unwrap();
        session.select_file(Some("sh010_anim_v001.ma")).unwrap();
        let before = session.selection().clone();

        studio.file("p1/sq010/sh010/maya/sh010_anim_v002.ma");
        assert!(session.on_watched_directory_changed(&studio.root().join("p1/sq010/sh010/maya")));

        assert_eq!(session.files(), ["sh010_anim_v001.ma", "sh010_anim_v002.ma"]);
        assert_eq!(session.selection(), &before);
    }

    #[test]
    fn test_unrelated_change_is_ignored() {
        let studio = studio();
        let mut session = session_at(&studio);
        assert!(!session.on_watched_directory_changed(Path::new("/somewhere/else")));
    }

    #[test]
    fn test_launch_without_role_fails() {
        let studio = studio();
        let mut session = session_at(&studio);
        session.select_project("p1").unwrap();
        let node = tree_row(&session, Some("sq010"), "sh010");
        session.select_seq_shot(&node).unwrap();

        let result = session.launch(&LauncherConfig::default());
        assert!(matches!(result, Err(LauncherError::NoRoleSelected)));
    }
}
