//! Integration tests for the `pulse` binary's non-interactive subcommands.
//!
//! Each test points `XDG_CONFIG_HOME` at a fresh temp dir so the user's real
//! configuration is never read or written.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PULSE_BIN: &str = env!("CARGO_BIN_EXE_pulse");

fn pulse_cmd(xdg: &TempDir) -> Command {
    let mut cmd = Command::new(PULSE_BIN);
    cmd.env("XDG_CONFIG_HOME", xdg.path()).env_remove("PULSE_LOG");
    cmd
}

fn config_file(xdg: &TempDir) -> PathBuf {
    xdg.path().join("pulse-dashboard").join("config.toml")
}

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("custom.toml");
    std::fs::write(&path, content).expect("failed to write config");
    path
}

#[test]
fn config_path_respects_xdg_config_home() {
    let xdg = TempDir::new().expect("tempdir");
    pulse_cmd(&xdg)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            config_file(&xdg).display().to_string(),
        ));
}

#[test]
fn config_init_creates_file_then_refuses_without_force() {
    let xdg = TempDir::new().expect("tempdir");
    pulse_cmd(&xdg)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration at"));
    assert!(config_file(&xdg).exists());

    pulse_cmd(&xdg)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    pulse_cmd(&xdg)
        .args(["config", "init", "--force"])
        .assert()
        .success();
    assert!(config_file(&xdg).with_extension("toml.backup").exists());
}

#[test]
fn config_validate_accepts_defaults() {
    let xdg = TempDir::new().expect("tempdir");
    pulse_cmd(&xdg)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn config_validate_reports_parse_position() {
    let xdg = TempDir::new().expect("tempdir");
    let path = write_config(xdg.path(), "[dashboard]\nwidgets = 42\n");
    pulse_cmd(&xdg)
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration at"));
}

#[test]
fn config_validate_rejects_bad_duration() {
    let xdg = TempDir::new().expect("tempdir");
    let path = write_config(xdg.path(), "[feed]\ninterval = \"soon\"\n");
    pulse_cmd(&xdg)
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("feed.interval"));
}

#[test]
fn config_validate_missing_explicit_file_fails() {
    let xdg = TempDir::new().expect("tempdir");
    pulse_cmd(&xdg)
        .args(["config", "validate", "--config"])
        .arg(xdg.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_show_prints_effective_values() {
    let xdg = TempDir::new().expect("tempdir");
    let path = write_config(xdg.path(), "[finance]\nsymbol = \"MSFT\"\n");
    pulse_cmd(&xdg)
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("symbol = \"MSFT\""))
        .stdout(predicate::str::contains("[dashboard]"));
}

#[test]
fn layout_lists_default_widgets() {
    let xdg = TempDir::new().expect("tempdir");
    pulse_cmd(&xdg)
        .arg("layout")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. weather  Weather"))
        .stdout(predicate::str::contains("2. news  News"))
        .stdout(predicate::str::contains("3. finance  Finance"));
}

#[test]
fn layout_marks_unregistered_ids() {
    let xdg = TempDir::new().expect("tempdir");
    let path = write_config(
        xdg.path(),
        "[dashboard]\nwidgets = [\"globe\", \"realtime\", \"globe\"]\n",
    );
    pulse_cmd(&xdg)
        .args(["layout", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. globe  (unregistered, not rendered)",
        ))
        .stdout(predicate::str::contains("2. realtime  Real-time"))
        .stdout(predicate::str::contains("3.").not());
}

#[test]
fn layout_json_output() {
    let xdg = TempDir::new().expect("tempdir");
    let path = write_config(xdg.path(), "[dashboard]\nwidgets = [\"finance\", \"globe\"]\n");
    let output = pulse_cmd(&xdg)
        .args(["layout", "--json", "--config"])
        .arg(&path)
        .output()
        .expect("failed to run pulse");
    assert!(output.status.success());

    let entries: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let entries = entries.as_array().expect("array of entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "finance");
    assert_eq!(entries[0]["registered"], true);
    assert_eq!(entries[0]["widget"], "Finance");
    assert_eq!(entries[1]["id"], "globe");
    assert_eq!(entries[1]["registered"], false);
    assert!(entries[1]["widget"].is_null());
}
