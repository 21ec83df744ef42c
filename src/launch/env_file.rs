//! Environment-definition file parsing
//!
//! The studio keeps a plain `KEY=VALUE` file of extra variables that Maya
//! needs. Lines starting with `#` are comments, blank lines are ignored, and
//! a line without a separator is reported and skipped.

use crate::{LauncherError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A line that could not be parsed as `KEY=VALUE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number
    pub line: usize,
    /// Trimmed line content
    pub text: String,
}

impl From<MalformedLine> for LauncherError {
    fn from(malformed: MalformedLine) -> Self {
        Self::MalformedEnvDefinition {
            line: malformed.line,
            text: malformed.text,
        }
    }
}

/// Parsed contents of an environment-definition file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDefinition {
    /// Variables in key order; a repeated key keeps its last value
    pub vars: BTreeMap<String, String>,
    /// Lines that were skipped
    pub malformed: Vec<MalformedLine>,
}

/// Parse environment-definition text
///
/// # Examples
/// ```
/// # use ylaunch::launch::env_file::parse_env_definition;
/// let def = parse_env_definition("# comment\nMAYA_APP_DIR=/studio/maya\n\nbroken line\n");
/// assert_eq!(def.vars["MAYA_APP_DIR"], "/studio/maya");
/// assert_eq!(def.malformed.len(), 1);
/// ```
#[must_use]
pub fn parse_env_definition(text: &str) -> EnvDefinition {
    let mut definition = EnvDefinition::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                definition
                    .vars
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
            _ => definition.malformed.push(MalformedLine {
                line: idx + 1,
                text: line.to_string(),
            }),
        }
    }

    definition
}

/// Read and parse an environment-definition file
///
/// # Errors
///
/// Returns `LauncherError::PathUnavailable` if the file cannot be read.
pub fn load_env_definition(path: &Path) -> Result<EnvDefinition> {
    let text = fs::read_to_string(path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "cannot read environment definition");
        LauncherError::PathUnavailable(path.to_path_buf())
    })?;
    Ok(parse_env_definition(&text))
}
