use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{error::DomainError, validation::DomainValidator};

/// Shared handle to a package held by the registry.
///
/// Every lookup of the same name yields a clone of the same `Arc`, so the
/// orchestrator mutates the registry's package in place.
pub type PackageHandle = Arc<RwLock<Package>>;

/// One generated source file, as returned by the generator.
///
/// `content` is raw text; fence markers are only stripped when the package
/// is materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
    /// `true` when `content` is a failure marker instead of a real answer.
    pub degraded: bool,
}

impl GeneratedFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            degraded: false,
        }
    }

    pub fn degraded(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            degraded: true,
            ..Self::new(name, content)
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// One side of the application: a technology name and its files.
///
/// Files can only be appended; there is no removal or reordering API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tier {
    pub tech: String,
    files: Vec<GeneratedFile>,
}

impl Tier {
    pub fn new(tech: impl Into<String>) -> Self {
        Self {
            tech: tech.into(),
            files: Vec::new(),
        }
    }

    /// Append a file after validating that its name stays relative.
    pub fn append(&mut self, file: GeneratedFile) -> Result<(), DomainError> {
        DomainValidator::validate_file_name(&file.name)?;
        self.files.push(file);
        Ok(())
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A named bundle of backend and frontend files generated for one
/// application description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: String,
    pub description: String,
    pub backend: Tier,
    pub frontend: Tier,
    pub created_at: DateTime<Utc>,
}

impl Package {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        backend_tech: impl Into<String>,
        frontend_tech: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            backend: Tier::new(backend_tech),
            frontend: Tier::new(frontend_tech),
            created_at: Utc::now(),
        }
    }

    pub fn file_count(&self) -> usize {
        self.backend.len() + self.frontend.len()
    }

    /// Names of files whose content is a failure marker, backend first.
    pub fn degraded_files(&self) -> Vec<String> {
        self.backend
            .files()
            .iter()
            .chain(self.frontend.files())
            .filter(|f| f.degraded)
            .map(|f| f.name.clone())
            .collect()
    }
}
