//! Interactive settings prompt
//!
//! Asks for the projects and publish roots when none are configured. The
//! answers only live in memory for the current session.

use super::LauncherConfig;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::PathBuf;

/// Prompt for the projects root and publish root
///
/// Existing values are offered as defaults. The returned configuration is
/// not saved.
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the entered
/// projects root is not an existing directory.
pub fn prompt_roots(mut config: LauncherConfig) -> Result<LauncherConfig, ConfigError> {
    let theme = ColorfulTheme::default();

    let current_root = config
        .root_path
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();
    let root: String = Input::with_theme(&theme)
        .with_prompt("Projects root directory")
        .with_initial_text(current_root)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let root = PathBuf::from(root.trim());
    if !root.is_dir() {
        return Err(ConfigError::Message(format!(
            "Projects root '{}' is not a directory",
            root.display()
        )));
    }

    let current_publish = config
        .publish_root_path
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();
    let publish: String = Input::with_theme(&theme)
        .with_prompt("Publish root directory")
        .with_initial_text(current_publish)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    tracing::info!(root = %root.display(), publish = %publish.trim(), "roots set for this session");
    config.root_path = Some(root);
    config.publish_root_path = match publish.trim() {
        "" => None,
        value => Some(PathBuf::from(value)),
    };

    Ok(config)
}
