//! Stackforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for stackforge,
//! which drafts a two-tier (backend/frontend) application by asking a
//! generative text service for one file at a time and writing the
//! sanitized answers to a fresh directory tree.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         stackforge-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (AppOrchestrator, GenerationClient,     │
//! │  Materializer)                          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: TextGenerator, Pacer,         │
//! │   Filesystem)                           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   stackforge-adapters (Infrastructure)  │
//! │ (GeminiGenerator, LocalFilesystem, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Package, ArtifactRegistry, stacks,     │
//! │  prompts, fence sanitizer)              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackforge_core::application::{AppOrchestrator, GenerationClient, Materializer};
//!
//! // Adapters come from `stackforge-adapters`.
//! let client = GenerationClient::new(generator, pacer);
//! let materializer = Materializer::new(filesystem, "./out");
//! let mut orchestrator = AppOrchestrator::new(client, materializer);
//!
//! let summary = orchestrator
//!     .create_app("A recipe app", "FastAPI", "Next.js")
//!     .unwrap();
//! println!("{summary}");
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AppOrchestrator, AppSummary, GenerationClient, GenerationResult, Materializer,
        ports::{Filesystem, GenerationError, Pacer, TextGenerator},
    };
    pub use crate::domain::{
        ArtifactRegistry, BackendStack, FrontendStack, GeneratedFile, Package, PackageHandle,
        Tier,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
