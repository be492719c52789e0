//! Integration tests for CLI command execution against real stores.

use clap::Parser;
use stagegate::cli::{Cli, execute, open_controller};
use stagegate::config::{ConfigError, GateConfig};
use stagegate_core::{GateError, Step};
use std::path::Path;
use tempfile::tempdir;

fn run(args: &[&str]) -> Result<(), GateError> {
    let cli = Cli::try_parse_from(args).expect("arguments parse");
    execute(cli)
}

fn write_config(dir: &Path) -> String {
    let path = dir.join("codes.toml");
    std::fs::write(
        &path,
        "storage_key = \"test-progress\"\n\n[codes]\n1 = \"yuka\"\n2 = \"sagittaire\"\n",
    )
    .expect("write config");
    path.to_string_lossy().into_owned()
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

#[test]
fn defaults_to_redb_and_status() {
    let cli = Cli::try_parse_from(["stagegate"]).expect("parse");
    assert_eq!(cli.backend.to_string(), "redb");
    assert!(cli.command.is_none());
    assert!(cli.config.is_none());
}

#[test]
fn rejects_unknown_backend() {
    assert!(Cli::try_parse_from(["stagegate", "--backend", "cloud"]).is_err());
}

#[test]
fn validate_requires_step() {
    assert!(Cli::try_parse_from(["stagegate", "validate", "yuka"]).is_err());
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

#[test]
fn validate_persists_across_invocations_redb() {
    let temp = tempdir().expect("temp dir");
    let db = temp.path().join("progress.db");
    let db = db.to_str().expect("utf-8 path");

    run(&["stagegate", "-q", "-D", db, "validate", "--step", "1", "Yuká "]).expect("validate");
    run(&["stagegate", "-q", "-D", db, "validate", "--step", "2", "wrong"]).expect("validate");

    let cli = Cli::try_parse_from(["stagegate", "-D", db]).expect("parse");
    let controller = open_controller(&cli).expect("open");
    assert!(controller.is_step_unlocked(Step(1)));
    assert!(controller.can_access_step(Step(2)));
    assert_eq!(controller.attempts(Step(1)), 1);
    assert_eq!(controller.attempts(Step(2)), 1);
}

#[test]
fn file_backend_with_config_and_reset() {
    let temp = tempdir().expect("temp dir");
    let config = write_config(temp.path());
    let store_dir = temp.path().join("store");
    let store_dir = store_dir.to_str().expect("utf-8 path");
    let base = ["stagegate", "-q", "-B", "file", "-D", store_dir, "-c", config.as_str()];

    let mut args = base.to_vec();
    args.extend(["validate", "--step", "1", "YUKA"]);
    run(&args).expect("validate");
    assert!(temp.path().join("store").join("test-progress.json").exists());

    let mut args = base.to_vec();
    args.push("reset");
    run(&args).expect("reset");

    let cli = Cli::try_parse_from(base).expect("parse");
    let controller = open_controller(&cli).expect("open");
    assert_eq!(controller.progress(), 0);
    assert_eq!(controller.attempts(Step(1)), 0);
    assert_eq!(controller.state().total_steps(), 2);
}

#[test]
fn unconfigured_step_is_an_error() {
    let result = run(&["stagegate", "-q", "-B", "memory", "validate", "--step", "9", "x"]);
    assert!(matches!(result, Err(GateError::UnconfiguredStep(Step(9)))));
}

#[test]
fn guard_and_steps_succeed_on_fresh_state() {
    run(&["stagegate", "-q", "-B", "memory", "--json-mode", "guard", "--step", "3"])
        .expect("guard");
    run(&["stagegate", "-q", "-B", "memory", "steps"]).expect("steps");
    run(&["stagegate", "-q", "-B", "memory", "--json-mode", "status"]).expect("status");
}

#[test]
fn corrupt_store_falls_back_to_defaults() {
    let temp = tempdir().expect("temp dir");
    std::fs::write(temp.path().join("stagegate-progress.json"), "{ definitely not json")
        .expect("seed corrupt snapshot");
    let dir = temp.path().to_str().expect("utf-8 path");

    let cli = Cli::try_parse_from(["stagegate", "-B", "file", "-D", dir]).expect("parse");
    let controller = open_controller(&cli).expect("open");
    assert_eq!(controller.progress(), 0);
    assert_eq!(controller.state().total_steps(), 5);
}

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

#[test]
fn missing_config_file_is_io_error() {
    let temp = tempdir().expect("temp dir");
    let missing = temp.path().join("nope.toml");

    let load = GateConfig::load(Some(missing.as_path()));
    assert!(matches!(load, Err(ConfigError::Read { .. })));

    let missing = missing.to_str().expect("utf-8 path");
    let result = run(&["stagegate", "-q", "-B", "memory", "-c", missing, "status"]);
    assert!(matches!(result, Err(GateError::IoError(_))));
}

#[test]
fn invalid_registry_is_rejected() {
    let temp = tempdir().expect("temp dir");
    let path = temp.path().join("bad.toml");
    std::fs::write(&path, "[codes]\n2 = \"sagittaire\"\n").expect("write config");
    let path = path.to_str().expect("utf-8 path");

    let result = run(&["stagegate", "-q", "-B", "memory", "-c", path]);
    assert!(matches!(result, Err(GateError::InvalidRegistry(_))));
}

#[test]
fn unusable_storage_key_is_rejected_up_front() {
    let temp = tempdir().expect("temp dir");
    let path = temp.path().join("spaced.toml");
    std::fs::write(&path, "storage_key = \"my progress\"\n[codes]\n1 = \"yuka\"\n")
        .expect("write config");
    let path = path.to_str().expect("utf-8 path");
    let store_dir = temp.path().join("store");
    let store_dir = store_dir.to_str().expect("utf-8 path");

    let mut args = vec!["stagegate", "-q", "-B", "file", "-D", store_dir, "-c", path];
    args.extend(["validate", "--step", "1", "yuka"]);
    let result = run(&args);
    assert!(matches!(result, Err(GateError::InvalidRegistry(_))));
    assert!(!temp.path().join("store").exists());
}

// =============================================================================
// BINARY
// =============================================================================

#[test]
fn binary_reports_failure_once() {
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_stagegate"))
        .args(["-q", "-B", "memory", "validate", "--step", "9", "x"])
        .env_remove("RUST_LOG")
        .env_remove("STAGEGATE_LOG_FORMAT")
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("No secret configured for step 9").count(), 1, "{}", stderr);
}
