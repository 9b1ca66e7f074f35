//! Integration tests for CLI logging output.
//!
//! Runs the built binary so logger installation happens in a fresh process.

use crate::integration::test_utils::{write_recipe, NPC_RECIPE};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn conjure(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_conjure"));
    cmd.env("HOME", home)
        .env_remove("CONJURE_LOG")
        .env_remove("CONJURE_LOG_FORMAT")
        .env_remove("CONJURE_LOG_OUTPUT")
        .env_remove("CONJURE_LOG_MODULES");
    cmd
}

#[test]
fn test_file_logging_records_startup_and_command() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    let workspace = temp_dir.path().join("ws");
    let log_file = temp_dir.path().join("logs").join("conjure.log");
    fs::create_dir_all(&home).unwrap();
    write_recipe(&workspace.join("recipes"), "npc.json", NPC_RECIPE);

    let output = conjure(&home)
        .arg("--workspace")
        .arg(&workspace)
        .args(["--log-level", "info", "--log-output", "file", "--log-file"])
        .arg(&log_file)
        .args(["roll", "npc"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "conjure roll should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("MASTER SMITH"));

    let content = fs::read_to_string(&log_file).unwrap();
    assert!(content.contains("Conjure CLI starting"), "got: {}", content);
    assert!(content.contains("Generation registry initialized"));
    assert!(content.contains("Command finished"));
}

#[test]
fn test_quiet_run_reports_errors_on_stderr_only() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    let workspace = temp_dir.path().join("ws");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&workspace).unwrap();

    let output = conjure(&home)
        .arg("--workspace")
        .arg(&workspace)
        .args(["--quiet", "roll", "dragon"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Recipe 'dragon' not registered."), "got: {}", stderr);
    assert!(!stderr.contains("Conjure CLI starting"));
}
