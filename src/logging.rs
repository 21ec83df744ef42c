//! Logging setup
//!
//! Logs go to `ylaunch.log` in the user's cache directory so the terminal UI
//! is never written over. The level comes from `YLAUNCH_LOG` (an
//! `EnvFilter` directive), falling back to `debug` with `--verbose` and
//! `info` otherwise. If the log file cannot be opened, logging falls back to
//! stderr.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "YLAUNCH_LOG";

/// Location of the log file
#[must_use]
pub fn log_path() -> Option<PathBuf> {
    Some(dirs::cache_dir()?.join("ylaunch").join("ylaunch.log"))
}

fn open_log_file() -> Option<File> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

fn filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber
///
/// Returns `false` if a subscriber was already installed.
pub fn init(verbose: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_target(false);

    let result = match open_log_file() {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result.is_ok()
}
