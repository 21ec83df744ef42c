//! Testing utilities for ylaunch
//!
//! This module provides a `StudioTree` wrapper for building throwaway
//! project hierarchies and a `RecordingWatcher` that stands in for the
//! notify backend.
//!
//! Only available when compiled with `cfg(test)`.

use crate::Result;
use crate::scanner::SeqShotRef;
use crate::session::LauncherSession;
use crate::watcher::ChangeWatcher;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary studio root that is removed on drop
pub struct StudioTree {
    dir: TempDir,
}

impl StudioTree {
    /// Create an empty studio root
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp studio root"),
        }
    }

    /// Absolute root path
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create a directory (and its parents) relative to the root
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create a file (and its parent directories) relative to the root
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn file(&self, relative: &str) -> PathBuf {
        self.file_with_content(relative, "test content")
    }

    /// Create a file with custom content
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn file_with_content(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

/// In-memory watcher that records registrations and replays injected changes
#[derive(Debug, Default)]
pub struct RecordingWatcher {
    /// Registered paths in registration order, without duplicates
    pub watched: Vec<PathBuf>,
    /// Changes to hand out on the next drain
    pub pending: BTreeSet<PathBuf>,
}

impl RecordingWatcher {
    /// Queue a change for `path`
    pub fn touch(&mut self, path: impl Into<PathBuf>) {
        self.pending.insert(path.into());
    }
}

impl ChangeWatcher for RecordingWatcher {
    fn watch(&mut self, path: &Path) -> Result<()> {
        if !self.watched.iter().any(|p| p == path) {
            self.watched.push(path.to_path_buf());
        }
        Ok(())
    }

    fn is_watching(&self, path: &Path) -> bool {
        self.watched.iter().any(|p| p == path)
    }

    fn drain(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

/// Row of the session's scanned seq/shot tree, as the browser shows it
///
/// # Panics
/// Panics if the tree has no row with that name under `parent`.
pub fn tree_row<W: ChangeWatcher>(session: &LauncherSession<W>, parent: Option<&str>, name: &str) -> SeqShotRef {
    session
        .seq_shot_tree()
        .row(parent, name)
        .expect("Row missing from the scanned seq/shot tree")
}
