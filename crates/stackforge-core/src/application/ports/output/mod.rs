//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stackforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::ForgeResult;

/// Why a single generation call produced no usable text.
///
/// Never escapes the generation client; it is folded into degraded file
/// content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The request never got a response (DNS, connect, TLS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status (quota, auth, ...).
    #[error("endpoint returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The endpoint answered, but the body held no text.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Port for the external generative text service.
///
/// Implemented by:
/// - `stackforge_adapters::generator::GeminiGenerator` (production)
/// - `stackforge_adapters::generator::ScriptedGenerator` (testing)
///
/// The credential and endpoint are fixed at construction; `generate` takes
/// the prompt as its sole input.
#[cfg_attr(test, mockall::automock)]
pub trait TextGenerator: Send + Sync {
    /// Issue one request and return the completion text verbatim.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Port for the fixed pause between generation calls.
///
/// Implemented by:
/// - `stackforge_adapters::pacing::FixedPacer` (blocking sleep)
#[cfg_attr(test, mockall::automock)]
pub trait Pacer: Send + Sync {
    /// Block the caller for the configured interval.
    fn pause(&self);
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stackforge_adapters::filesystem::LocalFilesystem` (production)
/// - `stackforge_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Every file below `root`, as full paths, in sorted order.
    fn list_files(&self, root: &Path) -> ForgeResult<Vec<PathBuf>>;
}
