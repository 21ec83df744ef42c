//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for ylaunch using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive three-pane browser (default)
//! - **ls**: Print projects, the seq/shot tree of a project, or a shot's files
//! - **launch**: Launch a role against a shot directory or file
//! - **config**: Show the effective configuration
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use ylaunch::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["ylaunch", "launch", "p1", "sh010", "--seq", "sq010", "--role", "nuke"]);
//! assert!(matches!(cli.get_command(), Commands::Launch { .. }));
//! ```

use crate::Role;
use crate::config::ConfigOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pipeline launcher for Maya, Houdini and Nuke
#[derive(Parser, Debug)]
#[command(name = "ylaunch", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Projects root directory (overrides config)
    #[arg(long = "root", global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Publish root directory (overrides config)
    #[arg(long = "publish-root", global = true, value_name = "DIR")]
    pub publish_root: Option<PathBuf>,

    /// Environment-definition file for Maya launches (overrides config)
    #[arg(long = "env-file", global = true, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Suppress informational output
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log at debug level
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Browse projects and shots interactively (default)
    #[command(visible_alias = "b")]
    Browse,

    /// List projects, a project's sequences and shots, or a shot's files
    #[command(visible_alias = "list")]
    Ls {
        /// Project to list (lists projects when omitted)
        project: Option<String>,

        /// Shot to list files of (lists the seq/shot tree when omitted)
        shot: Option<String>,

        /// Sequence containing the shot
        #[arg(short = 's', long = "seq", value_name = "SEQ")]
        sequence: Option<String>,

        /// Role directory to list
        #[arg(short = 'r', long = "role", value_enum)]
        role: Option<Role>,
    },

    /// Launch a DCC application for a shot
    #[command(visible_alias = "l")]
    Launch {
        /// Project name
        project: String,

        /// Shot name
        shot: String,

        /// Sequence containing the shot (omit for flat shots)
        #[arg(short = 's', long = "seq", value_name = "SEQ")]
        sequence: Option<String>,

        /// Application to launch
        #[arg(short = 'r', long = "role", value_enum)]
        role: Role,

        /// File inside the role directory (opens the directory when omitted)
        #[arg(short = 'f', long = "file")]
        file: Option<String>,

        /// Print the command and environment instead of launching
        #[arg(short = 'n', long = "dry-run")]
        dry_run: bool,
    },

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse)
    }

    /// Global flags that override the configuration file
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root_path: self.root.clone(),
            publish_root_path: self.publish_root.clone(),
            env_file: self.env_file.clone(),
            quiet: self.quiet,
        }
    }
}
