//! Directory change watching
//!
//! The session registers every directory a listing was read from. When the
//! immediate contents of one of them change, the directory shows up in the
//! next [`ChangeWatcher::drain`] so the dependent level can be rescanned.
//!
//! Notifications are produced on the notify backend thread but only ever
//! forwarded as raw paths over a channel; mapping them to watched directories
//! and acting on them happens on the thread that owns the session.

use crate::Result;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

/// Source of "this directory changed" notifications
pub trait ChangeWatcher {
    /// Register a directory; watching an already watched path is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the path (e.g. it does not
    /// exist). The path is not recorded in that case.
    fn watch(&mut self, path: &Path) -> Result<()>;

    /// Whether `path` is currently registered
    fn is_watching(&self, path: &Path) -> bool;

    /// Collect every watched directory that changed since the last drain
    ///
    /// Repeated changes to one directory coalesce into a single entry; no
    /// queued change is dropped. Entries are sorted.
    fn drain(&mut self) -> Vec<PathBuf>;
}

/// `notify`-backed watcher with non-recursive watches
pub struct DirWatcher {
    watcher: RecommendedWatcher,
    watched: HashSet<PathBuf>,
    rx: Receiver<notify::Result<notify::Event>>,
}

impl DirWatcher {
    /// Create a watcher using the platform's recommended backend
    ///
    /// # Errors
    ///
    /// Returns `LauncherError::WatchError` if the backend cannot be started.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let watcher = RecommendedWatcher::new(forwarder(tx), Config::default())?;
        Ok(Self {
            watcher,
            watched: HashSet::new(),
            rx,
        })
    }

    /// Number of registered directories
    #[must_use]
    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }
}

/// Build the backend callback; it only forwards, never interprets
fn forwarder(
    tx: Sender<notify::Result<notify::Event>>,
) -> impl Fn(notify::Result<notify::Event>) + Send + 'static {
    move |res| {
        // Receiver gone means the session is shutting down
        let _ = tx.send(res);
    }
}

impl ChangeWatcher for DirWatcher {
    fn watch(&mut self, path: &Path) -> Result<()> {
        if self.watched.contains(path) {
            return Ok(());
        }
        self.watcher.watch(path, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %path.display(), "watching directory");
        self.watched.insert(path.to_path_buf());
        Ok(())
    }

    fn is_watching(&self, path: &Path) -> bool {
        self.watched.contains(path)
    }

    fn drain(&mut self) -> Vec<PathBuf> {
        let mut events = Vec::new();
        while let Ok(res) = self.rx.try_recv() {
            match res {
                Ok(event) => events.push(event),
                Err(e) => tracing::warn!(error = %e, "watch backend reported an error"),
            }
        }
        coalesce(&self.watched, events)
    }
}

/// Map raw events to the watched directories they affect
///
/// An event path that is itself watched maps to itself; otherwise it maps to
/// its parent when the parent is watched. Paths matching neither are ignored.
#[must_use]
pub fn coalesce(watched: &HashSet<PathBuf>, events: Vec<notify::Event>) -> Vec<PathBuf> {
    let mut affected = BTreeSet::new();
    for event in events {
        if event.kind.is_access() {
            continue;
        }
        for path in event.paths {
            if watched.contains(&path) {
                affected.insert(path.clone());
            }
            if let Some(parent) = path.parent()
                && watched.contains(parent)
            {
                affected.insert(parent.to_path_buf());
            }
        }
    }
    affected.into_iter().collect()
}
