//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal setup, drawing or input failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The session could not be started
    #[error("Launcher error: {0}")]
    LauncherError(#[from] crate::LauncherError),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
