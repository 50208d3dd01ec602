//! Binary-level tests for the `stratum` CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stratum(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stratum").expect("binary builds");
    cmd.current_dir(dir.path());
    cmd
}

fn write_config(dir: &TempDir) {
    std::fs::write(
        dir.path().join("stratum.toml"),
        "[database]\nprovider = \"sqlite\"\nurl = \"sqlite://app.db\"\n",
    )
    .unwrap();
}

#[test]
fn help_lists_the_core_subcommands() {
    let tmp = TempDir::new().unwrap();
    stratum(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("up"))
        .stdout(predicate::str::contains("down"))
        .stdout(predicate::str::contains("stamp"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn init_scaffolds_the_project_layout() {
    let tmp = TempDir::new().unwrap();
    stratum(&tmp).arg("init").assert().success();

    assert!(tmp.path().join("stratum.toml").exists());
    assert!(tmp.path().join("migrations/up").is_dir());
    assert!(tmp.path().join("migrations/down").is_dir());
}

#[test]
fn new_scaffolds_consecutive_versions() {
    let tmp = TempDir::new().unwrap();

    stratum(&tmp).args(["new", "sql"]).assert().success();
    stratum(&tmp).args(["new", "sql"]).assert().success();

    for rel in ["up/1.sql", "down/1.sql", "up/2.sql", "down/2.sql"] {
        assert!(tmp.path().join("migrations").join(rel).exists(), "{rel} missing");
    }

    let up = std::fs::read_to_string(tmp.path().join("migrations/up/2.sql")).unwrap();
    assert!(up.contains("INSERT INTO db_version (version) VALUES (2);"));
    let down = std::fs::read_to_string(tmp.path().join("migrations/down/2.sql")).unwrap();
    assert!(down.contains("DELETE FROM db_version WHERE version = 2;"));
}

#[test]
fn new_rejects_unknown_unit_types() {
    let tmp = TempDir::new().unwrap();
    stratum(&tmp)
        .args(["new", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported migration type"));
}

#[test]
fn sqlite_round_trip_through_the_binary() {
    let tmp = TempDir::new().unwrap();
    write_config(&tmp);

    // init prepares the ledger table since a URL is configured.
    stratum(&tmp).arg("init").assert().success();

    // Scaffolded units are valid as-is: they carry only the ledger
    // statement.
    stratum(&tmp).args(["new", "sql"]).assert().success();

    stratum(&tmp).arg("up").assert().success();

    // `version` prints the current version and exits with it.
    stratum(&tmp)
        .arg("version")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1"));

    stratum(&tmp).args(["down", "0"]).assert().success();

    stratum(&tmp)
        .arg("version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("none"));
}

#[test]
fn stamp_and_remove_round_trip_through_the_binary() {
    let tmp = TempDir::new().unwrap();
    write_config(&tmp);

    stratum(&tmp).arg("init").assert().success();
    stratum(&tmp).args(["new", "sql"]).assert().success();

    stratum(&tmp).arg("stamp").assert().success();
    stratum(&tmp).arg("version").assert().code(1);

    stratum(&tmp).args(["remove", "1"]).assert().success();
    stratum(&tmp).arg("version").assert().code(0);
}
