//! `Filesystem` kept in a map, for tests and dry pipelines.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use stackforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ForgeResult,
};

/// Files and directories held in memory.
///
/// Clones share state, so a test can keep one handle while the
/// materializer owns another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    failing_writes: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Empty tree with no directories.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryState::default())),
        }
    }

    /// Content last written to `path`.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Make every write to `path` fail (testing helper).
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing_writes.insert(path.into());
        }
    }

    /// List all files, sorted.
    pub fn all_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Drop every file and directory. Injected failures stay.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
        }
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        if inner.failing_writes.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to write file: injected failure".into(),
            }
            .into());
        }

        // Materializer creates parents first; mirror the OS refusal.
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }

    fn list_files(&self, root: &Path) -> ForgeResult<Vec<PathBuf>> {
        let inner = self.inner.read().map_err(|_| lock_error(root))?;
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect())
    }
}

fn lock_error(path: &Path) -> stackforge_core::error::ForgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "In-memory filesystem lock poisoned".into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_dir_all_drops_nested_entries() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("out/app/frontend/pages")).unwrap();
        fs.write_file(Path::new("out/app/frontend/pages/index.js"), "x")
            .unwrap();

        fs.remove_dir_all(Path::new("out/app")).unwrap();

        assert!(!fs.exists(Path::new("out/app")));
        assert!(!fs.exists(Path::new("out/app/frontend/pages")));
        assert!(fs.all_files().is_empty());
        assert!(fs.exists(Path::new("out")));
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("out/main.py"), "x").is_err());
    }

    #[test]
    fn injected_failure_is_reported() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("out")).unwrap();
        fs.fail_writes_to("out/main.py");
        assert!(fs.write_file(Path::new("out/main.py"), "x").is_err());
        assert!(fs.write_file(Path::new("out/other.py"), "x").is_ok());
    }

    #[test]
    fn list_files_is_scoped_to_root() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("a")).unwrap();
        fs.create_dir_all(Path::new("b")).unwrap();
        fs.write_file(Path::new("a/1"), "").unwrap();
        fs.write_file(Path::new("b/2"), "").unwrap();

        assert_eq!(
            fs.list_files(Path::new("a")).unwrap(),
            [PathBuf::from("a/1")]
        );
    }
}
