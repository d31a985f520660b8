//! CLI integration tests for the `regroup` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes,
//! prompts, and the fatal-path behavior. No network is involved: every
//! run here fails at the key-file stage, before any request is issued.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn regroup() -> Command {
    Command::cargo_bin("regroup").expect("regroup binary")
}

// ──────────────────────────────────────────────
// 1. Flag surface
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    regroup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrate static device groups"));
}

#[test]
fn version_exits_0() {
    regroup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("regroup"));
}

#[test]
fn unknown_flag_is_rejected() {
    regroup().arg("--no-such-flag").assert().failure();
}

// ──────────────────────────────────────────────
// 2. Fatal key-file paths — the sentinel exit code
// ──────────────────────────────────────────────

#[test]
fn nonexistent_source_key_file_exits_1() {
    regroup()
        .write_stdin("/no/such/key.json\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not load key file"));
}

#[test]
fn malformed_source_key_file_exits_1() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "this is not json").unwrap();

    regroup()
        .write_stdin(format!("{}\n", file.path().display()))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not load key file"));
}

#[test]
fn valid_source_key_still_prompts_for_destination() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"host": "src.example.com", "api_key": "abc"}}"#
    )
    .unwrap();

    // Source key loads, destination path does not exist: the run must
    // reach the second prompt and then fail with the same sentinel.
    regroup()
        .write_stdin(format!("{}\n/no/such/dest.json\n", file.path().display()))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("/no/such/dest.json"));
}
