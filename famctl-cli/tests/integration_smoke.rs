//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn famctl() -> Command {
    let mut cmd = Command::cargo_bin("famctl").unwrap();
    // Keep the developer's DATABASE_URL / .env out of the picture
    cmd.env_remove("DATABASE_URL").current_dir(std::env::temp_dir());
    cmd
}

// === Families Command Tests ===

#[test]
fn test_families_list_help() {
    famctl()
        .args(["families", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Case-insensitive match"));
}

#[test]
fn test_families_show_help() {
    famctl()
        .args(["families", "show", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User id of the parent account"));
}

#[test]
fn test_families_show_rejects_non_numeric_id() {
    famctl()
        .args(["families", "show", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// === Serve / Migrate Command Tests ===

#[test]
fn test_serve_help() {
    famctl()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_migrate_help() {
    famctl()
        .args(["migrate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database URL"));
}
