//! Failures of the pipeline itself: writing files and sharing packages.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed. Aborts the rest of materialization.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A package lock was poisoned by a panic elsewhere.
    #[error("Package '{name}' is unavailable: lock poisoned")]
    PackageLock { name: String },
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before the failure were left in place".into(),
            ],
            Self::PackageLock { .. } => vec![
                "An earlier step panicked while holding the package".into(),
                "Re-run the command".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::PackageLock { .. } => ErrorCategory::Internal,
        }
    }
}
