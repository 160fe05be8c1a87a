// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Rejections raised while turning model-chosen names into safe paths.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("File name cannot be empty")]
    EmptyFileName,

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the application root: {path}")]
    PathTraversal { path: String },

    #[error("File name has no final component: {path}")]
    MissingBaseName { path: String },
}

impl DomainError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AbsolutePathNotAllowed { path } | Self::PathTraversal { path } => vec![
                format!("Generated file '{}' would be written outside the app root", path),
                "File names must be relative and must not contain '..'".into(),
            ],
            Self::EmptyFileName | Self::MissingBaseName { .. } => {
                vec!["Every planned file needs a non-empty relative name".into()]
            }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyFileName
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathTraversal { .. }
            | Self::MissingBaseName { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
