//! Infrastructure adapters for stackforge.
//!
//! This crate implements the ports defined in `stackforge-core::application::ports`.
//! It contains all external dependencies and I/O operations: the local
//! filesystem, the Gemini HTTP endpoint, and blocking pacing.

pub mod filesystem;
pub mod generator;
pub mod pacing;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use generator::{ApiKey, GeminiConfig, GeminiGenerator, ScriptedGenerator};
pub use pacing::FixedPacer;
