pub mod package;
pub mod registry;

pub use crate::domain::DomainError;
pub use package::{GeneratedFile, Package, PackageHandle, Tier};
pub use registry::ArtifactRegistry;
