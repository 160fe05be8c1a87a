//! Application layer for stackforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (AppOrchestrator, GenerationClient,
//!   Materializer)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain layer and the ports. Package
//! rules, stack profiles and sanitization live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    APP_PACKAGE_NAME, AppOrchestrator, AppSummary, FAILURE_MARKER, GenerationClient,
    GenerationResult, MaterializeReport, Materializer, PlannedFile,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, GenerationError, Pacer, TextGenerator};

pub use error::ApplicationError;
