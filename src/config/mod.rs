//! Configuration module for ylaunch
//!
//! Manages the studio paths the launcher needs: the projects and publish
//! roots, the environment-definition file and the installed DCC binaries.
//! Configuration is read from the user's config directory, then overridden
//! by `YLAUNCH_*` environment variables and finally by CLI flags. The file is
//! never written; roots chosen interactively only last for the session.

mod setup;

pub use setup::prompt_roots;

use crate::Role;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Installed DCC executables, resolved once at startup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Executables {
    /// Maya binary
    #[serde(default = "Executables::default_maya")]
    pub maya: PathBuf,

    /// Houdini binary
    #[serde(default = "Executables::default_houdini")]
    pub houdini: PathBuf,

    /// Nuke binary (started with `--nukex`)
    #[serde(default = "Executables::default_nuke")]
    pub nuke: PathBuf,
}

impl Executables {
    fn default_maya() -> PathBuf {
        PathBuf::from("/usr/autodesk/maya2023/bin/maya")
    }

    fn default_houdini() -> PathBuf {
        PathBuf::from("/opt/hfs19.5/bin/houdini")
    }

    fn default_nuke() -> PathBuf {
        PathBuf::from("/usr/local/Nuke13.2v4/Nuke13.2")
    }

    /// Executable for a role
    #[must_use]
    pub fn for_role(&self, role: Role) -> &Path {
        match role {
            Role::Maya => &self.maya,
            Role::Houdini => &self.houdini,
            Role::Nuke => &self.nuke,
        }
    }
}

impl Default for Executables {
    fn default() -> Self {
        Self {
            maya: Self::default_maya(),
            houdini: Self::default_houdini(),
            nuke: Self::default_nuke(),
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Projects root directory
    #[serde(default)]
    pub root_path: Option<PathBuf>,

    /// Publish root, exported as `PUBLISH_ROOT`
    #[serde(default)]
    pub publish_root_path: Option<PathBuf>,

    /// Environment-definition file merged into Maya launches
    #[serde(default)]
    pub env_file: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// DCC binaries
    #[serde(default)]
    pub executables: Executables,
}

/// Values supplied on the command line that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_path: Option<PathBuf>,
    pub publish_root_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub quiet: bool,
}

impl LauncherConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("ylaunch").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; nothing is created on disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit file, layering `YLAUNCH_*` variables on top
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("YLAUNCH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if overrides.root_path.is_some() {
            self.root_path = overrides.root_path;
        }
        if overrides.publish_root_path.is_some() {
            self.publish_root_path = overrides.publish_root_path;
        }
        if overrides.env_file.is_some() {
            self.env_file = overrides.env_file;
        }
        self.quiet = self.quiet || overrides.quiet;
        self
    }

    /// Whether a non-empty projects root is configured
    #[must_use]
    pub fn has_root(&self) -> bool {
        self.root_path
            .as_ref()
            .is_some_and(|root| !root.as_os_str().is_empty())
    }

    /// Render the effective configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }
}
