use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the device log analyzer.
#[derive(Error, Debug)]
pub enum DevlogError {
    /// A log source could not be opened or read.
    #[error("Failed to read log file {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report file could not be opened for append or written.
    #[error("Failed to append to report {path}: {source}")]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory to scan for log files does not exist.
    #[error("Directory not found: {0}")]
    LogsDirNotFound(PathBuf),
}

impl DevlogError {
    /// Path of the file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            DevlogError::SourceUnavailable { path, .. }
            | DevlogError::DestinationUnavailable { path, .. }
            | DevlogError::LogsDirNotFound(path) => path,
        }
    }
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, DevlogError>;
