//! Materializer - writes a package to a fresh directory tree.
//!
//! Layout under `<output_dir>/generated_app/`, whatever the package is called:
//!
//! ```text
//! backend/<file name>                 (nested segments kept)
//! frontend/pages/<basename of file>   (nested segments flattened)
//! ```
//!
//! An existing app root is removed first; output always replaces, never
//! merges, so a second package leaves nothing of the first behind. Writes are independent: a failure aborts the remaining writes
//! and leaves earlier files on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{
        DomainError, Package,
        sanitize::{strip_backend_fences, strip_frontend_fences},
    },
    error::ForgeResult,
};

/// Registry key and directory name of the generated application.
pub const APP_PACKAGE_NAME: &str = "generated_app";

pub const BACKEND_DIR: &str = "backend";
pub const FRONTEND_DIR: &str = "frontend";
pub const PAGES_DIR: &str = "pages";

/// What a `save` call wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    pub root: PathBuf,
    /// Written files relative to `root`, in write order.
    pub written: Vec<PathBuf>,
}

pub struct Materializer {
    filesystem: Box<dyn Filesystem>,
    output_dir: PathBuf,
}

impl Materializer {
    pub fn new(filesystem: Box<dyn Filesystem>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            output_dir: output_dir.into(),
        }
    }

    /// The one directory every `save` replaces.
    pub fn app_root(&self) -> PathBuf {
        self.output_dir.join(APP_PACKAGE_NAME)
    }

    /// Replace the app root with the package's sanitized files.
    #[instrument(skip_all, fields(package = %package.name))]
    pub fn save(&self, package: &Package) -> ForgeResult<MaterializeReport> {
        let root = self.app_root();
        let backend_dir = root.join(BACKEND_DIR);
        let pages_dir = root.join(FRONTEND_DIR).join(PAGES_DIR);

        // 1. Fresh replacement
        if self.filesystem.exists(&root) {
            info!(root = %root.display(), "Removing previous output");
            self.filesystem.remove_dir_all(&root)?;
        }

        // 2. Skeleton
        self.filesystem.create_dir_all(&backend_dir)?;
        self.filesystem.create_dir_all(&pages_dir)?;

        let mut written = Vec::with_capacity(package.file_count());

        // 3. Backend files keep their relative path
        for file in package.backend.files() {
            let path = backend_dir.join(&file.name);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.write(&path, &strip_backend_fences(&file.content))?;
            written.push(Path::new(BACKEND_DIR).join(&file.name));
        }

        // 4. Frontend files are flattened into pages/
        for file in package.frontend.files() {
            let base = Path::new(&file.name)
                .file_name()
                .ok_or_else(|| DomainError::MissingBaseName {
                    path: file.name.clone(),
                })?;
            let path = pages_dir.join(base);
            self.write(&path, &strip_frontend_fences(&file.content))?;
            written.push(Path::new(FRONTEND_DIR).join(PAGES_DIR).join(base));
        }

        info!(
            root = %root.display(),
            files = written.len(),
            "Package materialized"
        );

        Ok(MaterializeReport { root, written })
    }

    /// Files currently under `root`, relative to it and sorted.
    pub fn list_tree(&self, root: &Path) -> ForgeResult<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = self
            .filesystem
            .list_files(root)?
            .into_iter()
            .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect();
        files.sort();
        Ok(files)
    }

    fn write(&self, path: &Path, content: &str) -> ForgeResult<()> {
        debug!(path = %path.display(), bytes = content.len(), "Writing file");
        self.filesystem.write_file(path, content)
    }
}
