//! Output abstraction layer
//!
//! Advisories and launch results go through `OutputWriter` so the same code
//! reports to stdout in CLI mode and to the status bar in the TUI.

use crate::LauncherError;
use colored::Colorize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Trait for output operations
///
/// # Examples
///
/// ```no_run
/// use ylaunch::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new(false);
/// output.write("p1");
/// output.success("Launched nuke");
/// output.error("Path unavailable");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);

    /// Report an advisory or failure at the level it deserves
    fn report(&self, err: &LauncherError) {
        if err.is_advisory() {
            self.warning(&err.to_string());
        } else {
            self.error(&err.to_string());
        }
    }
}

/// CLI implementation - writes to stdout/stderr
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    /// Create a new stdout writer; `quiet` suppresses success and info lines
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message.dimmed());
        }
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Normal message
    Normal,
    /// Error message
    Error,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Info message
    Info,
}

/// Buffered writer for the TUI status bar
///
/// Messages expire after a TTL so old advisories do not linger.
#[derive(Clone)]
pub struct StatusBarWriter {
    messages: Arc<Mutex<Vec<(MessageLevel, String, Instant)>>>,
    ttl: Duration,
}

impl StatusBarWriter {
    /// Create a new status bar writer with default TTL (8 seconds)
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(8))
    }

    /// Create a new status bar writer with custom TTL
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    /// Get the most recent unexpired message, if any
    #[must_use]
    pub fn latest_message(&self) -> Option<(MessageLevel, String)> {
        let now = Instant::now();
        let messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);

        messages
            .iter()
            .rev()
            .find(|(_, _, time)| now.duration_since(*time) < self.ttl)
            .map(|(level, msg, _)| (*level, msg.clone()))
    }

    /// Get count of unexpired messages
    #[must_use]
    pub fn message_count(&self) -> usize {
        let now = Instant::now();
        let messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);

        messages
            .iter()
            .filter(|(_, _, time)| now.duration_since(*time) < self.ttl)
            .count()
    }

    fn add_message(&self, level: MessageLevel, message: String) {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        messages.push((level, message, Instant::now()));

        // Keep only last 100 messages
        if messages.len() > 100 {
            messages.drain(0..50);
        }
    }
}

impl Default for StatusBarWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StatusBarWriter {
    fn write(&self, message: &str) {
        self.add_message(MessageLevel::Normal, message.to_string());
    }

    fn error(&self, message: &str) {
        self.add_message(MessageLevel::Error, message.to_string());
    }

    fn success(&self, message: &str) {
        self.add_message(MessageLevel::Success, message.to_string());
    }

    fn warning(&self, message: &str) {
        self.add_message(MessageLevel::Warning, message.to_string());
    }

    fn info(&self, message: &str) {
        self.add_message(MessageLevel::Info, message.to_string());
    }
}
