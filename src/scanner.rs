//! Hierarchy scanning
//!
//! Reads the project, seq/shot and file levels straight from the filesystem.
//! Nothing here caches: every call reflects the directory as it is now.

use crate::resolver::Role;
use crate::{LauncherError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Kind of directory entry a listing keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File,
}

/// List the immediate child directories of `path`, sorted ascending
///
/// A path that does not exist yields an empty listing.
///
/// # Errors
///
/// Returns `LauncherError::PathUnavailable` if `path` is unset or exists but
/// is not a directory, and `LauncherError::IoError` if reading fails.
///
/// # Examples
/// ```
/// # use ylaunch::scanner::list_subdirectories;
/// # use std::path::Path;
/// let names = list_subdirectories(Some(Path::new("/definitely/not/here"))).unwrap();
/// assert!(names.is_empty());
/// ```
pub fn list_subdirectories(path: Option<&Path>) -> Result<Vec<String>> {
    let path = path.ok_or_else(|| LauncherError::PathUnavailable(PathBuf::new()))?;
    if !path.exists() {
        return Ok(Vec::new());
    }
    list_entries(path, EntryKind::Directory)
}

/// List the immediate child files of `path`, sorted ascending
///
/// Names beginning with `.` are never returned.
///
/// # Errors
///
/// Returns `LauncherError::PathUnavailable` if `path` is unset, missing or not
/// a directory, and `LauncherError::IoError` if reading fails.
pub fn list_files(path: Option<&Path>) -> Result<Vec<String>> {
    let path = path.ok_or_else(|| LauncherError::PathUnavailable(PathBuf::new()))?;
    let mut files = list_entries(path, EntryKind::File)?;
    files.retain(|name| !name.starts_with('.'));
    Ok(files)
}

fn list_entries(path: &Path, kind: EntryKind) -> Result<Vec<String>> {
    if !path.is_dir() {
        return Err(LauncherError::PathUnavailable(path.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        // Follows symlinks so linked shot folders behave like real ones
        let is_dir = entry.path().is_dir();
        let wanted = match kind {
            EntryKind::Directory => is_dir,
            EntryKind::File => !is_dir,
        };
        if !wanted {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::warn!(path = %path.display(), name = ?raw, "skipping non UTF-8 entry"),
        }
    }

    names.sort();
    names.dedup();
    Ok(names)
}

/// A node of the two-level seq/shot tree
///
/// Top-level nodes are either sequences (they have children) or flat shots
/// (they have none). Children are always shots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqShotNode {
    /// Directory name
    pub name: String,
    /// Absolute directory path
    pub path: PathBuf,
    /// Nested shots, sorted ascending; always empty below the top level
    pub children: Vec<SeqShotNode>,
}

impl SeqShotNode {
    /// Whether this node has no nested shots
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Reference to this node when it sits at the top level
    #[must_use]
    pub fn as_top_level(&self) -> SeqShotRef {
        SeqShotRef {
            name: self.name.clone(),
            parent: None,
            is_leaf: self.is_leaf(),
        }
    }
}

/// Identifies a clicked seq/shot node without borrowing the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqShotRef {
    /// Node name
    pub name: String,
    /// Name of the parent sequence, `None` for top-level nodes
    pub parent: Option<String>,
    /// Whether the node has no nested shots
    pub is_leaf: bool,
}

impl SeqShotRef {
    /// Reference to a shot nested under `parent`
    #[must_use]
    pub fn nested(parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
            is_leaf: true,
        }
    }

    /// Reference to a top-level node
    #[must_use]
    pub fn top_level(name: impl Into<String>, is_leaf: bool) -> Self {
        Self {
            name: name.into(),
            parent: None,
            is_leaf,
        }
    }

    /// Whether selecting this node can produce a file listing
    ///
    /// Nested shots and top-level leaves (flat shots) are listable; a
    /// top-level node with children is a sequence group.
    #[must_use]
    pub const fn is_listable(&self) -> bool {
        self.parent.is_some() || self.is_leaf
    }
}

/// Result of scanning a project directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeqShotTree {
    /// Top-level nodes, sorted ascending
    pub nodes: Vec<SeqShotNode>,
    /// Every directory read while building the tree
    pub visited: Vec<PathBuf>,
}

impl SeqShotTree {
    /// Flatten the tree in display order: each node followed by its children
    #[must_use]
    pub fn flatten(&self) -> Vec<SeqShotRef> {
        let mut rows = Vec::new();
        for node in &self.nodes {
            rows.push(node.as_top_level());
            for child in &node.children {
                rows.push(SeqShotRef::nested(&node.name, &child.name));
            }
        }
        rows
    }

    /// Look up a top-level node by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SeqShotNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Row for `name` nested under `parent`, or at the top level without one
    ///
    /// Returns `None` when the tree has no such node.
    #[must_use]
    pub fn row(&self, parent: Option<&str>, name: &str) -> Option<SeqShotRef> {
        match parent {
            Some(parent) => self
                .find(parent)?
                .children
                .iter()
                .any(|child| child.name == name)
                .then(|| SeqShotRef::nested(parent, name)),
            None => self.find(name).map(SeqShotNode::as_top_level),
        }
    }
}

/// Whether a directory name is a role folder rather than a nested shot
fn is_role_folder(name: &str) -> bool {
    Role::ALL.iter().any(|role| role.as_str() == name)
}

/// Scan a project directory into the seq/shot tree
///
/// Role folders (`maya`, `houdini`, `nuke`) directly under a top-level node
/// are not nested shots, so a flat shot holding only role folders scans as
/// a leaf.
///
/// # Errors
///
/// Returns `LauncherError::PathUnavailable` if `project_path` is not a
/// directory. Unreadable sequence directories are logged and kept as leaves.
pub fn scan_seq_shot_tree(project_path: &Path) -> Result<SeqShotTree> {
    if !project_path.is_dir() {
        return Err(LauncherError::PathUnavailable(project_path.to_path_buf()));
    }

    let mut tree = SeqShotTree {
        nodes: Vec::new(),
        visited: vec![project_path.to_path_buf()],
    };

    for name in list_subdirectories(Some(project_path))? {
        let path = project_path.join(&name);
        let children = match list_subdirectories(Some(&path)) {
            Ok(children) => children,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read sequence directory");
                Vec::new()
            }
        };
        tree.visited.push(path.clone());

        let children = children
            .into_iter()
            .filter(|child| !is_role_folder(child))
            .map(|child| SeqShotNode {
                path: path.join(&child),
                name: child,
                children: Vec::new(),
            })
            .collect();

        tree.nodes.push(SeqShotNode { name, path, children });
    }

    Ok(tree)
}
