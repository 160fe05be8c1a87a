// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for stackforge.
//!
//! This module contains pure logic with no I/O. Talking to the generative
//! endpoint, sleeping between calls and touching the filesystem all happen
//! behind ports defined in the application layer.
//!
//! ## Contents
//!
//! - **Entities**: `Package`, `Tier`, `GeneratedFile`, `ArtifactRegistry`
//! - **Stacks**: static profiles mapping a technology to its generated files
//! - **Prompts**: one prompt per generated file, in generation order
//! - **Sanitize**: Markdown fence stripping applied before writing
//!
pub mod entities;
pub mod error;
pub mod prompts;
pub mod sanitize;
pub mod stacks;

mod validation;

// Re-exports for convenience
pub use entities::{
    package::{GeneratedFile, Package, PackageHandle, Tier},
    registry::ArtifactRegistry,
};

pub use error::{DomainError, ErrorCategory};

pub use prompts::{FilePrompt, FileRole};
pub use stacks::{BACKEND_STACKS, BackendStack, FRONTEND_STACKS, FrontendStack};

pub use validation::DomainValidator;
