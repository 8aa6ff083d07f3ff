//! The default-exclusion config resource.
//!
//! Patterns live in a plain-text file, one per line; blank lines and lines
//! starting with `#` are ignored. The set shipped in
//! `src/default_excludes.conf` is used when no user file exists; a file at
//! `<config dir>/treecat/exclude.conf` overrides it, and an explicit path
//! (CLI `--config`) overrides both. Defaults are always merged before any
//! user-supplied `--exclude` patterns.

use crate::error::TreecatError;
use std::fs;
use std::path::{Path, PathBuf};

/// Pattern set compiled into the binary.
const DEFAULT_EXCLUDES: &str = include_str!("default_excludes.conf");

/// Parses the line-oriented pattern format.
pub fn parse_patterns(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// The built-in default exclusion patterns.
pub fn default_patterns() -> Vec<String> {
    parse_patterns(DEFAULT_EXCLUDES)
}

/// Loads patterns from a file in the same format.
pub fn load_patterns_file(path: &Path) -> Result<Vec<String>, TreecatError> {
    let text = fs::read_to_string(path).map_err(|source| TreecatError::PatternFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_patterns(&text))
}

/// Where a user-level pattern file is looked for, if the platform has a
/// config directory at all.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("treecat").join("exclude.conf"))
}
