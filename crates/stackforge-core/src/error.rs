//! The error every public core operation returns.
//!
//! [`ForgeError`] folds the domain and application errors together and adds
//! the two failures that belong to neither layer. Generation failures never
//! show up here: the generation client turns them into degraded file content.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

pub type ForgeResult<T> = Result<T, ForgeError>;

#[derive(Debug, Error, Clone)]
pub enum ForgeError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Missing credential or unusable settings. Always fatal.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A state the pipeline should never reach.
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

/// Coarse grouping the front end uses for exit codes and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}

impl ForgeError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        use crate::domain::ErrorCategory as Layer;

        match self {
            Self::Domain(inner) => match inner.category() {
                Layer::Validation => ErrorCategory::Validation,
                Layer::Internal => ErrorCategory::Internal,
            },
            Self::Application(inner) => inner.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Next steps to show the user, most specific first.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(inner) => inner.suggestions(),
            Self::Application(inner) => inner.suggestions(),
            Self::Configuration { message } => vec![
                format!("Fix the setting reported above: {message}"),
                "Check the environment and the config file, then run again".into(),
            ],
            Self::Internal { .. } => vec![
                "Re-run with -vvv and include the log when reporting the problem".into(),
            ],
        }
    }
}
