//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_serve() {
    let mut cmd = Command::cargo_bin("newsroom").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("newsroom").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_serve_rejects_bad_port() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("newsroom").unwrap();
    cmd.current_dir(dir.path()).args(["serve", "--in-memory", "--port", "99999"]);

    cmd.assert().failure().stderr(predicate::str::contains("--port"));
}

#[test]
fn test_serve_rejects_bad_bind_address() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("newsroom").unwrap();
    cmd.current_dir(dir.path()).args(["serve", "--in-memory", "--bind", "not-an-ip"]);

    cmd.assert().failure();
}
