//! CLI integration tests using assert_cmd
//!
//! These tests verify the CLI commands work correctly end-to-end against a
//! temporary configuration directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the dbshelf binary
fn dbshelf_cmd() -> Command {
    Command::cargo_bin("dbshelf").expect("Failed to find dbshelf binary")
}

fn dbshelf_in(dir: &TempDir) -> Command {
    let mut cmd = dbshelf_cmd();
    cmd.arg("--config-dir").arg(dir.path());
    cmd
}

#[test]
fn test_help_command() {
    dbshelf_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "dbshelf - connection profile manager",
        ));
}

#[test]
fn test_version_command() {
    dbshelf_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dbshelf"));
}

#[test]
fn test_list_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    dbshelf_in(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiles found."));
}

#[test]
fn test_add_and_list() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    dbshelf_in(&dir)
        .args([
            "add",
            "Prod DB",
            "--group",
            "Work",
            "--url",
            "jdbc:postgresql://db1/prod",
            "--tag",
            "prod",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added '{Work}/Prod DB'"));

    dbshelf_in(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work").and(predicate::str::contains("Prod DB")));
}

#[test]
fn test_list_name_filter() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    dbshelf_in(&dir).args(["add", "Alpha"]).assert().success();
    dbshelf_in(&dir).args(["add", "Beta"]).assert().success();

    dbshelf_in(&dir)
        .args(["list", "--name-filter", "al"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha").and(predicate::str::contains("Beta").not()));
}

#[test]
fn test_move_between_groups() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    dbshelf_in(&dir)
        .args(["add", "Prod DB", "--group", "G1"])
        .assert()
        .success();

    dbshelf_in(&dir)
        .args(["mv", "{G1}/Prod DB", "--to", "G2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 1 profile(s) to 'G2'"));

    dbshelf_in(&dir)
        .args(["show", "{G2}/Prod DB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Group:        G2"));
}

#[test]
fn test_copy_keeps_original() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    dbshelf_in(&dir)
        .args(["add", "Prod DB", "--group", "G1"])
        .assert()
        .success();

    dbshelf_in(&dir)
        .args(["copy", "{G1}/Prod DB", "--to", "G2"])
        .assert()
        .success();

    dbshelf_in(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("G1").and(predicate::str::contains("G2")));
}

#[test]
fn test_rm_group_removes_members() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    dbshelf_in(&dir)
        .args(["add", "Prod DB", "--group", "G"])
        .assert()
        .success();

    dbshelf_in(&dir)
        .args(["rm-group", "G"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 profile(s)"));

    dbshelf_in(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiles found."));
}

#[test]
fn test_rm_unknown_profile_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    dbshelf_in(&dir)
        .args(["rm", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no profile matches 'Missing'"));
}

#[test]
fn test_malformed_key_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    dbshelf_in(&dir)
        .args(["show", "{Work/Prod DB"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing closing '}'"));
}

#[test]
fn test_template_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    dbshelf_in(&dir)
        .args(["template", "add", "System schemas", "pg_%, information_schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added template 'System schemas'"));

    dbshelf_in(&dir)
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("System schemas")
                .and(predicate::str::contains("pg_%, information_schema")),
        );

    dbshelf_in(&dir)
        .args(["template", "rm", "System schemas"])
        .assert()
        .success();

    dbshelf_in(&dir)
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No filter templates saved."));
}
