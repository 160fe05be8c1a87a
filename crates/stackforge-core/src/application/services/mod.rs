//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate and write an application".

pub mod generation_client;
pub mod materializer;
pub mod orchestrator;

pub use generation_client::{FAILURE_MARKER, GenerationClient, GenerationResult};
pub use materializer::{APP_PACKAGE_NAME, MaterializeReport, Materializer};
pub use orchestrator::{AppOrchestrator, AppSummary, PlannedFile};
