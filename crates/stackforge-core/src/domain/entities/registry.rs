use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use tracing::debug;

use crate::domain::entities::package::{Package, PackageHandle};

/// In-memory store of packages, keyed and ordered by name.
///
/// There is no removal: a registry lives as long as the orchestrator that
/// owns it.
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    packages: BTreeMap<String, PackageHandle>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the package registered under `name`, creating it if needed.
    ///
    /// On a repeat call the existing package is returned untouched; the
    /// description and tech arguments are ignored, not merged.
    pub fn create_or_get(
        &mut self,
        name: &str,
        description: &str,
        backend_tech: &str,
        frontend_tech: &str,
    ) -> PackageHandle {
        if let Some(existing) = self.packages.get(name) {
            debug!(package = name, "Reusing registered package");
            return Arc::clone(existing);
        }

        debug!(
            package = name,
            backend = backend_tech,
            frontend = frontend_tech,
            "Registering new package"
        );
        let handle = Arc::new(RwLock::new(Package::new(
            name,
            description,
            backend_tech,
            frontend_tech,
        )));
        self.packages.insert(name.to_owned(), Arc::clone(&handle));
        handle
    }

    pub fn get(&self, name: &str) -> Option<PackageHandle> {
        self.packages.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Registered names in key order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
