//! Errors surfaced by the `stackforge` binary.
//!
//! Every failure ends up as a [`CliError`], which knows its exit code, a
//! handful of hints for the user and how to render itself on stderr.

use std::error::Error as _;
use std::io;

use owo_colors::OwoColorize;
use thiserror::Error;

use stackforge_core::error::{ErrorCategory as CoreCategory, ForgeError};

use crate::config::AppConfig;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown config key '{key}'")]
    UnknownConfigKey { key: String },

    /// A config file could not be read, parsed or serialised.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Core(#[from] ForgeError),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot encode JSON output")]
    Json(#[from] serde_json::Error),

    #[error("Cancelled, nothing was written")]
    Cancelled,
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        Self::Io {
            context: "Terminal output failed".into(),
            source,
        }
    }
}

/// How an error is reported and which exit code it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments or a declined prompt. Exit 2.
    Usage,
    /// Unreadable config or missing credential. Exit 4.
    Configuration,
    /// Filesystem trouble or a bug. Exit 1.
    Internal,
}

impl CliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_) | Self::UnknownConfigKey { .. } | Self::Cancelled => {
                ErrorCategory::Usage
            }
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::Usage,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Io { .. } | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Usage => 2,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Hints printed under the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput(_) => vec!["Run with --help for usage".into()],

            Self::UnknownConfigKey { .. } => std::iter::once("Known keys:".to_owned())
                .chain(AppConfig::KEYS.iter().map(|k| format!("  {k}")))
                .collect(),

            Self::Config { .. } => vec![
                format!(
                    "Check {} and any file passed with --config",
                    AppConfig::config_path().display()
                ),
                "Run 'stackforge init --force' to rewrite the defaults".into(),
            ],

            Self::Core(ForgeError::Configuration { .. }) => vec![
                "Set GEMINI_API_KEY (or the variable named by generation.api_key_env)".into(),
                "A .env file in the current directory is also read".into(),
                "Use --dry-run to preview the files without a key".into(),
            ],

            Self::Core(core) => core.suggestions(),

            Self::Io { source, .. } => vec![format!("Cause: {source}")],

            Self::Json(_) | Self::Cancelled => Vec::new(),
        }
    }

    /// Text for stderr. `color` adds ANSI styling; `verbose` adds the cause
    /// chain and drops the `-v` hint.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_owned() }
        };

        let mut out = format!(
            "\n{} {}\n",
            paint("error:", |t| t.red().bold().to_string()),
            self
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!(
                    "  {} {err}\n",
                    paint("caused by:", |t| t.dimmed().to_string())
                ));
                cause = err.source();
            }
        }

        let hints = self.suggestions();
        if !hints.is_empty() {
            out.push('\n');
            for hint in hints {
                out.push_str(&format!(
                    "{} {hint}\n",
                    paint("hint:", |t| t.yellow().to_string())
                ));
            }
        }

        if !verbose && self.category() == ErrorCategory::Internal {
            out.push_str("\nRe-run with -v for details.\n");
        }

        out
    }

    /// Record the failure in the log before it is printed.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Usage => tracing::warn!(error = %self, "Command rejected"),
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(error = %self, exit_code = self.exit_code(), "Command failed")
            }
        }
    }
}

/// Attach a message to an I/O failure.
pub trait IoContext<T> {
    fn context(self, what: impl FnOnce() -> String) -> CliResult<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn context(self, what: impl FnOnce() -> String) -> CliResult<T> {
        self.map_err(|source| CliError::Io {
            context: what(),
            source,
        })
    }
}
