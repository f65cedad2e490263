//! Error types for catalog builds.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors that abort a catalog build.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// A path component is not valid UTF-8 and cannot go into the manifest.
    #[error("Path is not valid UTF-8: {path}")]
    InvalidPath { path: PathBuf },

    /// Output location exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Manifest serialization failed.
    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Configured scan root does not exist.
    MissingRoot,
    /// Configured scan root exists but is not a directory.
    NotADirectory,
}

/// Non-fatal condition encountered during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a missing scan root warning.
    pub fn missing_root(root: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            message: format!("Directory '{root}' not found. Skipping."),
            path: path.into(),
            kind: WarningKind::MissingRoot,
        }
    }

    /// Create a warning for a scan root that is a file.
    pub fn root_not_a_directory(root: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            message: format!("'{root}' is not a directory. Skipping."),
            path: path.into(),
            kind: WarningKind::NotADirectory,
        }
    }
}
