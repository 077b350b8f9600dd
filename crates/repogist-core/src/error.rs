//! Error and warning types for scan operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard failures that abort a scan-and-snapshot operation.
///
/// Soft conditions (unsafe symlinks, budget pruning, binary files, ...)
/// never surface here; they are logged and recorded as [`ScanWarning`]s.
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

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The scan produced no nodes at all.
    #[error("No files found in {path}")]
    NothingToScan { path: PathBuf },

    /// A user-supplied glob pattern failed to compile.
    #[error("Invalid filter pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Building the directory tree failed for a non-skippable reason.
    #[error("Failed to generate directory tree: {message}")]
    TreeGeneration { message: String },

    /// Content extraction failed for a non-skippable reason.
    #[error("Content processing failed: {message}")]
    ContentProcessing { message: String },
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
    /// Permission was denied while listing a directory.
    PermissionDenied,
    /// Symlink target resolved outside the scan root.
    UnsafeSymlink,
    /// Canonical path was already recorded earlier in the scan.
    AlreadyVisited,
    /// Directory depth budget reached.
    DepthLimit,
    /// File count budget reached.
    FileLimit,
    /// Total size budget reached.
    SizeLimit,
    /// Error reading a file or its metadata.
    ReadError,
}

/// Non-fatal skip condition recorded during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the condition occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a permission denied warning.
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Permission denied: {}", path.display()),
            path,
            kind: WarningKind::PermissionDenied,
        }
    }

    /// Create an unsafe symlink warning.
    pub fn unsafe_symlink(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!(
                "Symlink points outside the scan root: {}",
                path.display()
            ),
            path,
            kind: WarningKind::UnsafeSymlink,
        }
    }

    /// Create an already-visited warning.
    pub fn already_visited(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Already visited path: {}", path.display()),
            path,
            kind: WarningKind::AlreadyVisited,
        }
    }

    /// Create a read error warning.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Read error: {error}"),
            path,
            kind: WarningKind::ReadError,
        }
    }
}
