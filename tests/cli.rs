//! Command-line failure modes that do not need a database.

use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;

fn dbcompare() -> Command {
    let mut cmd = Command::cargo_bin("dbcompare").unwrap();
    cmd.env_remove("DBCOMPARE_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_config_fails() {
    let dir = tempdir().unwrap();

    let output = dbcompare()
        .current_dir(dir.path())
        .arg("diff")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "stderr: {stderr}");
}

#[test]
fn malformed_config_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "db": { "source": {} } }"#).unwrap();

    let output = dbcompare()
        .arg("check")
        .arg("--config")
        .arg(&path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid configuration"), "stderr: {stderr}");
}

#[test]
fn invalid_table_override_is_rejected_by_argument_parsing() {
    let output = dbcompare()
        .args(["diff", "--source-table", "a.b.c"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--source-table"), "stderr: {stderr}");
}

#[test]
fn help_lists_subcommands() {
    let output = dbcompare().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("check"));
    assert!(stdout.contains("diff"));
}
