use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures that abort a run.
///
/// Per-file problems (binary content, oversized files, unreadable or
/// undecodable files) are never errors; they become [`FileRecord`]
/// classifications plus a warning on the side channel, and the run
/// continues.
///
/// [`FileRecord`]: crate::FileRecord
#[derive(Debug, Error)]
pub enum TreecatError {
    #[error("root directory not found: {path}")]
    RootNotFound { path: PathBuf },
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },
    #[error("invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("failed to read pattern file {path}: {source}")]
    PatternFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TreecatError {
    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TreecatError::OutputWrite {
            path: path.into(),
            source,
        }
    }
}
