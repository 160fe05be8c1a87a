//! Integration tests for the stackforge binary.

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the caller's credential and config overrides.
fn stackforge(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("stackforge");
    cmd.current_dir(dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("stacks"));
}

#[test]
fn version_flag_prints_version() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn stacks_lists_defaults() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .arg("stacks")
        .assert()
        .success()
        .stdout(predicate::str::contains("FastAPI"))
        .stdout(predicate::str::contains("Next.js"));
}

#[test]
fn stacks_json_is_parseable() {
    let temp = TempDir::new().unwrap();
    let assert = stackforge(&temp)
        .args(["stacks", "--format", "json", "--tier", "backend"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r["tier"] == "backend"));
}

#[test]
fn dry_run_needs_no_credential_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .args(["create", "A recipe app", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main.py"))
        .stdout(predicate::str::contains("pages/index.js"));

    assert!(!temp.path().join("generated_app").exists());
}

#[test]
fn missing_credential_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .args(["create", "A recipe app", "--yes"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("GEMINI_API_KEY"));

    assert!(!temp.path().join("generated_app").exists());
}

#[test]
fn empty_description_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .args(["create", "   ", "--dry-run"])
        .assert()
        .code(2);
}

#[test]
fn config_get_reads_defaults() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .args(["config", "get", "defaults.backend"])
        .env_remove("STACKFORGE_DEFAULTS__BACKEND")
        .assert()
        .success()
        .stdout(predicate::str::contains("FastAPI"));
}

#[test]
fn config_get_honours_environment() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .args(["config", "get", "defaults.frontend"])
        .env("STACKFORGE_DEFAULTS__FRONTEND", "Svelte")
        .assert()
        .success()
        .stdout(predicate::str::contains("Svelte"));
}

#[test]
fn config_get_unknown_key_fails() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("defaults.lang"));
}

#[test]
fn local_config_file_is_picked_up() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(".stackforge.toml"),
        "[defaults]\nbackend = \"Gin\"\n",
    )
    .unwrap();

    stackforge(&temp)
        .args(["config", "get", "defaults.backend"])
        .env_remove("STACKFORGE_DEFAULTS__BACKEND")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gin"));
}

#[test]
fn missing_explicit_config_exits_with_configuration_code() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .args(["--config", "absent.toml", "stacks"])
        .assert()
        .code(4);
}

#[test]
fn init_local_keeps_existing_file_unless_forced() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".stackforge.toml");
    std::fs::write(&path, "# mine\n").unwrap();

    stackforge(&temp).args(["init", "--local"]).assert().success();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

    stackforge(&temp)
        .args(["init", "--local", "--force"])
        .assert()
        .success();
    assert!(std::fs::read_to_string(&path).unwrap().contains("[generation]"));
}

#[test]
fn completions_bash() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn unknown_flag_exits_with_usage_code() {
    let temp = TempDir::new().unwrap();
    stackforge(&temp)
        .args(["create", "A recipe app", "--bogus"])
        .assert()
        .code(2);
}

fn with_broken_local_config() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(".stackforge.toml"), "[defaults\nbackend = ").unwrap();
    temp
}

#[test]
fn broken_local_config_does_not_block_stacks_or_completions() {
    let temp = with_broken_local_config();

    stackforge(&temp)
        .args(["stacks", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FastAPI"));

    stackforge(&temp)
        .args(["completions", "bash"])
        .assert()
        .success();
}

#[test]
fn broken_local_config_can_be_rewritten_by_init() {
    let temp = with_broken_local_config();

    stackforge(&temp)
        .args(["init", "--local", "--force"])
        .assert()
        .success();

    stackforge(&temp)
        .args(["config", "get", "defaults.backend"])
        .env_remove("STACKFORGE_DEFAULTS__BACKEND")
        .assert()
        .success()
        .stdout(predicate::str::contains("FastAPI"));
}

#[test]
fn broken_local_config_fails_commands_that_read_it() {
    let temp = with_broken_local_config();

    stackforge(&temp)
        .args(["config", "list"])
        .assert()
        .code(4);
}
