//! ylaunch - a pipeline launcher for DCC applications
//!
//! This library provides the navigation core behind the launcher: it scans a
//! studio's project / sequence / shot hierarchy from the live filesystem,
//! keeps the listings fresh under change notifications, and assembles the
//! command line and environment used to start Maya, Houdini or Nuke.
//!
//! # Layout
//!
//! ```text
//! <root>/<project>/<sequence>/<shot>/<role>/<file>
//! <root>/<project>/<shot>/<role>/<file>
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub mod cli;
pub mod config;
pub mod launch;
pub mod logging;
pub mod output;
pub mod resolver;
pub mod scanner;
pub mod session;
pub mod tui;
pub mod watcher;

#[cfg(test)]
pub mod testing;

pub use resolver::Role;
pub use session::{LauncherSession, Selection, SessionState};

/// Error enum, contains all failure states of the launcher
#[derive(Debug, Error)]
pub enum LauncherError {
    /// A directory expected to exist does not, or is not a directory
    #[error("Path unavailable: {}", .0.display())]
    PathUnavailable(PathBuf),

    /// A role is required for file listing and launching
    #[error("No role selected, choose a role first")]
    NoRoleSelected,

    /// A line in the environment-definition file has no `KEY=VALUE` separator
    #[error("Malformed environment definition at line {line}: {text}")]
    MalformedEnvDefinition {
        /// 1-based line number
        line: usize,
        /// The offending line, trimmed
        text: String,
    },

    /// Transition requested from a state that does not allow it
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),

    /// Change watcher failure
    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),

    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LauncherError {
    /// Whether this error is an advisory the user can resolve in place
    #[must_use]
    pub const fn is_advisory(&self) -> bool {
        matches!(
            self,
            Self::PathUnavailable(_) | Self::NoRoleSelected | Self::MalformedEnvDefinition { .. }
        )
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LauncherError>;
