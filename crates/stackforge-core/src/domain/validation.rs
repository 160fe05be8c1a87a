use std::path::{Component, Path};

use crate::domain::error::DomainError;

pub struct DomainValidator;

impl DomainValidator {
    /// A generated file name must stay inside its tier directory.
    pub fn validate_file_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyFileName);
        }

        let path = Path::new(name);
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed { path: name.into() });
        }

        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(DomainError::PathTraversal { path: name.into() });
        }

        if path.file_name().is_none() {
            return Err(DomainError::MissingBaseName { path: name.into() });
        }

        Ok(())
    }
}
