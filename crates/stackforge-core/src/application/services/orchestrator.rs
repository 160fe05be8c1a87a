//! App orchestrator - main application use case.
//!
//! This service coordinates the whole workflow:
//! 1. Create or reuse the package in the registry
//! 2. Generate backend files, one prompt at a time
//! 3. Generate frontend files, one prompt at a time
//! 4. Materialize the package
//! 5. Summarize the resulting file tree
//!
//! Every step runs even if earlier generation calls degraded; only
//! filesystem and lock failures stop the pipeline.

use std::{
    collections::BTreeMap,
    fmt,
    path::PathBuf,
    sync::{RwLockReadGuard, RwLockWriteGuard},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        services::{
            generation_client::GenerationClient,
            materializer::{APP_PACKAGE_NAME, Materializer},
        },
    },
    domain::{
        ArtifactRegistry, FilePrompt, FileRole, GeneratedFile, Package, PackageHandle, Tier,
        prompts::{backend_prompts, frontend_prompts},
        stacks::{resolve_backend, resolve_frontend},
    },
    error::ForgeResult,
};

/// A file a run would generate, for dry runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub tier: &'static str,
    pub role: FileRole,
    /// Path relative to the app root after materialization.
    pub path: PathBuf,
}

/// Result of [`AppOrchestrator::create_app`].
#[derive(Debug, Clone, Serialize)]
pub struct AppSummary {
    pub package: String,
    pub description: String,
    pub backend_tech: String,
    pub frontend_tech: String,
    pub root: PathBuf,
    /// Files found under `root` after writing, relative and sorted.
    pub files: Vec<PathBuf>,
    /// Package file names whose content is a failure marker.
    pub degraded: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl AppSummary {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// The file tree drawn with box characters, rooted at the app dir name.
    pub fn tree(&self) -> String {
        let root_name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.package.clone());
        render_tree(&root_name, &self.files)
    }
}

impl fmt::Display for AppSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree())
    }
}

/// Main orchestration service.
pub struct AppOrchestrator {
    registry: ArtifactRegistry,
    client: GenerationClient,
    materializer: Materializer,
}

impl AppOrchestrator {
    pub fn new(client: GenerationClient, materializer: Materializer) -> Self {
        Self {
            registry: ArtifactRegistry::new(),
            client,
            materializer,
        }
    }

    pub fn registry(&self) -> &ArtifactRegistry {
        &self.registry
    }

    pub fn client(&self) -> &GenerationClient {
        &self.client
    }

    /// Generate the backend entry point and data model, in that order.
    #[instrument(skip_all)]
    pub fn generate_backend(&mut self, package: &PackageHandle) -> ForgeResult<PackageHandle> {
        let prompts = {
            let pkg = read(package)?;
            let stack = resolve_backend(&pkg.backend.tech);
            backend_prompts(stack, &pkg.backend.tech, &pkg.description)
        };
        self.run_prompts(package, prompts, |pkg| &mut pkg.backend)?;
        Ok(PackageHandle::clone(package))
    }

    /// Generate the frontend landing page.
    #[instrument(skip_all)]
    pub fn generate_frontend(&mut self, package: &PackageHandle) -> ForgeResult<PackageHandle> {
        let prompts = {
            let pkg = read(package)?;
            let stack = resolve_frontend(&pkg.frontend.tech);
            frontend_prompts(stack, &pkg.frontend.tech, &pkg.description)
        };
        self.run_prompts(package, prompts, |pkg| &mut pkg.frontend)?;
        Ok(PackageHandle::clone(package))
    }

    /// End-to-end pipeline: register, generate, materialize, summarize.
    #[instrument(skip_all, fields(backend = backend_tech, frontend = frontend_tech))]
    pub fn create_app(
        &mut self,
        description: &str,
        backend_tech: &str,
        frontend_tech: &str,
    ) -> ForgeResult<AppSummary> {
        info!(package = APP_PACKAGE_NAME, "Creating application");

        let package =
            self.registry
                .create_or_get(APP_PACKAGE_NAME, description, backend_tech, frontend_tech);

        self.generate_backend(&package)?;
        self.generate_frontend(&package)?;

        let pkg = read(&package)?;
        let report = self.materializer.save(&pkg)?;
        let files = self.materializer.list_tree(&report.root)?;

        let summary = AppSummary {
            package: pkg.name.clone(),
            description: pkg.description.clone(),
            backend_tech: pkg.backend.tech.clone(),
            frontend_tech: pkg.frontend.tech.clone(),
            root: report.root,
            files,
            degraded: pkg.degraded_files(),
            generated_at: Utc::now(),
        };

        info!(
            root = %summary.root.display(),
            files = summary.files.len(),
            degraded = summary.degraded.len(),
            calls = self.client.calls(),
            "Application created\n{}",
            summary.tree()
        );

        Ok(summary)
    }

    /// Files a run with these technologies would produce, without calling
    /// the generator.
    pub fn plan(backend_tech: &str, frontend_tech: &str) -> Vec<PlannedFile> {
        let backend = backend_prompts(resolve_backend(backend_tech), backend_tech, "");
        let frontend = frontend_prompts(resolve_frontend(frontend_tech), frontend_tech, "");

        let backend = backend.into_iter().map(|p| PlannedFile {
            tier: "backend",
            role: p.role,
            path: PathBuf::from("backend").join(p.file_name),
        });
        let frontend = frontend.into_iter().map(|p| {
            let base = p.file_name.rsplit('/').next().unwrap_or(p.file_name);
            PlannedFile {
                tier: "frontend",
                role: p.role,
                path: PathBuf::from("frontend").join("pages").join(base),
            }
        });

        backend.chain(frontend).collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Issue prompts strictly in order, appending each answer to the tier
    /// picked by `tier`. No lock is held while a call is in flight.
    fn run_prompts(
        &mut self,
        package: &PackageHandle,
        prompts: Vec<FilePrompt>,
        tier: impl Fn(&mut Package) -> &mut Tier,
    ) -> ForgeResult<()> {
        for prompt in prompts {
            info!(file = prompt.file_name, role = %prompt.role, "Generating file");

            let result = self.client.generate(&prompt.text);
            let file = if result.is_failure() {
                GeneratedFile::degraded(prompt.file_name, result.into_content(prompt.comment))
            } else {
                GeneratedFile::new(prompt.file_name, result.into_content(prompt.comment))
            };

            let mut pkg = write(package)?;
            tier(&mut *pkg).append(file)?;
        }
        Ok(())
    }
}

fn read(package: &PackageHandle) -> ForgeResult<RwLockReadGuard<'_, Package>> {
    package.read().map_err(|poisoned| {
        ApplicationError::PackageLock {
            name: poisoned.get_ref().name.clone(),
        }
        .into()
    })
}

fn write(package: &PackageHandle) -> ForgeResult<RwLockWriteGuard<'_, Package>> {
    package.write().map_err(|poisoned| {
        ApplicationError::PackageLock {
            name: poisoned.get_ref().name.clone(),
        }
        .into()
    })
}

// ── Tree rendering ────────────────────────────────────────────────────────────

#[derive(Default)]
struct TreeNode {
    children: BTreeMap<String, TreeNode>,
}

fn render_tree(root_name: &str, files: &[PathBuf]) -> String {
    let mut root = TreeNode::default();
    for file in files {
        let mut node = &mut root;
        for part in file.iter() {
            node = node
                .children
                .entry(part.to_string_lossy().into_owned())
                .or_default();
        }
    }

    let mut out = format!("{root_name}/\n");
    render_children(&root, "", &mut out);
    out
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        let suffix = if child.children.is_empty() { "" } else { "/" };
        out.push_str(&format!("{prefix}{connector}{name}{suffix}\n"));

        let next = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_children(child, &next, out);
    }
}
