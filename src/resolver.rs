//! Path resolution and per-role launch conventions
//!
//! Computes the directory a file listing should reflect from a partial
//! selection, and exposes the static table describing how each DCC
//! application is started.

use crate::{LauncherError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// DCC application context
///
/// Determines both the role subdirectory under a shot and the shape of the
/// launch command. "No role" is modelled as `Option<Role>::None`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Autodesk Maya
    Maya,
    /// SideFX Houdini
    Houdini,
    /// Foundry Nuke (always started as NukeX)
    Nuke,
}

impl Role {
    /// All roles in picker order
    pub const ALL: [Self; 3] = [Self::Maya, Self::Houdini, Self::Nuke];

    /// Directory name and `ROLE` value for this role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Maya => "maya",
            Self::Houdini => "houdini",
            Self::Nuke => "nuke",
        }
    }

    /// Launch convention for this role
    #[must_use]
    pub const fn convention(self) -> LaunchConvention {
        match self {
            Self::Maya => LaunchConvention {
                leading_args: &[],
                file_flag: Some("-file"),
                directory_launch: DirectoryLaunch::Flag("-proj"),
            },
            Self::Nuke => LaunchConvention {
                leading_args: &["--nukex"],
                file_flag: None,
                directory_launch: DirectoryLaunch::Flag("-m"),
            },
            Self::Houdini => LaunchConvention {
                leading_args: &[],
                file_flag: None,
                directory_launch: DirectoryLaunch::EnvVar("JOB"),
            },
        }
    }

    /// Next entry of the role picker, wrapping through "no role"
    ///
    /// # Examples
    /// ```
    /// # use ylaunch::Role;
    /// assert_eq!(Role::cycle(None), Some(Role::Maya));
    /// assert_eq!(Role::cycle(Some(Role::Nuke)), None);
    /// ```
    #[must_use]
    pub const fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Maya),
            Some(Self::Maya) => Some(Self::Houdini),
            Some(Self::Houdini) => Some(Self::Nuke),
            Some(Self::Nuke) => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "maya" => Ok(Self::Maya),
            "houdini" => Ok(Self::Houdini),
            "nuke" => Ok(Self::Nuke),
            other => Err(LauncherError::InvalidState(format!("unknown role '{other}'"))),
        }
    }
}

/// How a role is started without a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryLaunch {
    /// Append this flag followed by the directory path
    Flag(&'static str),
    /// Set this environment variable to the directory path, no extra argument
    EnvVar(&'static str),
}

/// Static command-line shape for one role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConvention {
    /// Arguments always passed right after the executable
    pub leading_args: &'static [&'static str],
    /// Flag preceding the file path; `None` means the path is positional
    pub file_flag: Option<&'static str>,
    /// Shape of a launch without a selected file
    pub directory_launch: DirectoryLaunch,
}

/// Compute the role directory for a selection
///
/// Returns `root/project/sequence/shot/role` when a sequence is given and
/// `root/project/shot/role` otherwise.
///
/// # Errors
///
/// Returns `LauncherError::PathUnavailable` if the root is empty or any of
/// `project`, `shot` or `role` is unset.
///
/// # Examples
/// ```
/// # use ylaunch::{Role, resolver::resolve_file_path};
/// # use std::path::{Path, PathBuf};
/// let path = resolve_file_path(Path::new("/root"), Some("p1"), None, Some("s1"), Some(Role::Nuke)).unwrap();
/// assert_eq!(path, PathBuf::from("/root/p1/s1/nuke"));
/// ```
pub fn resolve_file_path(
    root: &Path,
    project: Option<&str>,
    sequence: Option<&str>,
    shot: Option<&str>,
    role: Option<Role>,
) -> Result<PathBuf> {
    let (Some(project), Some(shot), Some(role)) = (project, shot, role) else {
        return Err(LauncherError::PathUnavailable(partial_path(root, project, sequence, shot)));
    };
    if root.as_os_str().is_empty() {
        return Err(LauncherError::PathUnavailable(root.to_path_buf()));
    }

    let mut path = root.join(project);
    if let Some(sequence) = sequence {
        path.push(sequence);
    }
    path.push(shot);
    path.push(role.as_str());
    Ok(path)
}

/// Shot directory (the parent of every role directory) for a selection
#[must_use]
pub fn shot_dir(root: &Path, project: &str, sequence: Option<&str>, shot: &str) -> PathBuf {
    let mut path = root.join(project);
    if let Some(sequence) = sequence {
        path.push(sequence);
    }
    path.push(shot);
    path
}

/// Join whatever parts of a selection are known, for error reporting
fn partial_path(root: &Path, project: Option<&str>, sequence: Option<&str>, shot: Option<&str>) -> PathBuf {
    [project, sequence, shot]
        .into_iter()
        .flatten()
        .fold(root.to_path_buf(), |path, part| path.join(part))
}
