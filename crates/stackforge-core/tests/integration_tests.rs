//! Integration tests for stackforge-core through its public API.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use stackforge_core::{
    application::{AppOrchestrator, GenerationClient, Materializer},
    prelude::*,
};

#[derive(Clone, Default)]
struct Disk {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
}

impl Filesystem for Disk {
    fn create_dir_all(&self, _: &Path) -> ForgeResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().keys().any(|p| p.starts_with(path))
    }

    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()> {
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn list_files(&self, root: &Path) -> ForgeResult<Vec<PathBuf>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect())
    }
}

/// Answers every prompt with a fenced one-liner naming the call.
struct Numbered(Mutex<usize>);

impl TextGenerator for Numbered {
    fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        let mut n = self.0.lock().unwrap();
        *n += 1;
        Ok(format!("```\ncall {n}\n```\n"))
    }
}

struct NoPause;

impl Pacer for NoPause {
    fn pause(&self) {}
}

fn orchestrator(disk: &Disk) -> AppOrchestrator {
    AppOrchestrator::new(
        GenerationClient::new(Box::new(Numbered(Mutex::new(0))), Box::new(NoPause)),
        Materializer::new(Box::new(disk.clone()), "/out"),
    )
}

#[test]
fn summary_matches_plan_for_default_stacks() {
    let disk = Disk::default();
    let summary = orchestrator(&disk)
        .create_app("A recipe app", "FastAPI", "Next.js")
        .unwrap();

    let planned: Vec<PathBuf> = AppOrchestrator::plan("FastAPI", "Next.js")
        .into_iter()
        .map(|p| p.path)
        .collect();
    assert_eq!(summary.files, planned);
    assert_eq!(summary.root, PathBuf::from("/out/generated_app"));
    assert!(!summary.is_degraded());

    let files = disk.files.lock().unwrap();
    assert_eq!(
        files.get(Path::new("/out/generated_app/backend/main.py")).map(String::as_str),
        Some("call 1")
    );
    assert_eq!(
        files
            .get(Path::new("/out/generated_app/frontend/pages/index.js"))
            .map(String::as_str),
        Some("call 3")
    );
}

#[test]
fn summary_serialises_for_machine_output() {
    let disk = Disk::default();
    let summary = orchestrator(&disk)
        .create_app("A todo list", "Express", "Vue")
        .unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["package"], "generated_app");
    assert_eq!(json["backend_tech"], "Express");
    assert_eq!(json["frontend_tech"], "Vue");
    assert_eq!(json["files"].as_array().map(Vec::len), Some(3));
    assert!(json["degraded"].as_array().unwrap().is_empty());
}

#[test]
fn second_run_replaces_first() {
    let disk = Disk::default();
    orchestrator(&disk)
        .create_app("A recipe app", "FastAPI", "Next.js")
        .unwrap();
    disk.files
        .lock()
        .unwrap()
        .insert(PathBuf::from("/out/generated_app/stale.txt"), "old".into());

    let summary = orchestrator(&disk)
        .create_app("A recipe app", "FastAPI", "Next.js")
        .unwrap();
    assert_eq!(summary.files.len(), 3);
    assert!(!disk.exists(Path::new("/out/generated_app/stale.txt")));
}
