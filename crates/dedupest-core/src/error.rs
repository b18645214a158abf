//! Error types for estimation runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal configuration errors, surfaced before any scan starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Block size is not a positive multiple of 512.
    #[error("Invalid block size {block_size}: must be a positive multiple of 512 bytes")]
    InvalidBlockSize { block_size: u64 },

    /// Root path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error while resolving the root.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of per-file failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// File could not be opened.
    Open,
    /// Error while reading file content.
    Read,
    /// Permission was denied.
    PermissionDenied,
}

/// Non-fatal failure for a single file.
///
/// A failed file is skipped and recorded; it never aborts the run and
/// contributes nothing to the run totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    /// Path of the file that could not be processed.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of failure.
    pub kind: FailureKind,
}

impl FileFailure {
    /// Create a new file failure.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a failure for a file that could not be opened.
    pub fn open_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
            _ => FailureKind::Open,
        };
        Self {
            path: path.into(),
            message: format!("Cannot open: {error}"),
            kind,
        }
    }

    /// Create a failure for a read error mid-file.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            message: format!("Read error: {error}"),
            kind: FailureKind::Read,
        }
    }
}
