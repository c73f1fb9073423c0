//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("surfsup").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Station reported by /api/v1.0/tobs"));
}

#[test]
fn test_inspect_help() {
    let mut cmd = Command::cargo_bin("surfsup").unwrap();
    cmd.arg("inspect").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Include every station record"));
}

#[test]
fn test_inspect_missing_database_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("absent.sqlite");

    let mut cmd = Command::cargo_bin("surfsup").unwrap();
    cmd.current_dir(dir.path())
        .arg("inspect")
        .arg("--database")
        .arg(&db);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open climate database"));
    assert!(!db.exists());
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("surfsup.toml");
    std::fs::write(&config, "[database]\nmax_connections = 0\n").unwrap();

    let mut cmd = Command::cargo_bin("surfsup").unwrap();
    cmd.arg("--config").arg(&config).arg("inspect");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
