mod apps;

use assert_cmd::Command;
use predicates::prelude::*;

use appctl::PKG_VERSION;

#[test]
fn its_executable() {
    let mut cmd = Command::cargo_bin("appctl").unwrap();

    // running the CLI with no command returns to std err
    let result = cmd.assert().failure();
    result.stderr(predicate::str::contains("Usage"));
}

#[test]
fn it_prints_its_version() {
    let mut cmd = Command::cargo_bin("appctl").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(PKG_VERSION));
}

#[test]
fn it_explains_error_codes() {
    let mut cmd = Command::cargo_bin("appctl").unwrap();
    cmd.args(["explain", "E005"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("E005"));
}

#[test]
fn help_lists_every_command() {
    let mut cmd = Command::cargo_bin("appctl").unwrap();
    let output = cmd.arg("--help").assert().success().get_output().stdout.clone();
    let help = String::from_utf8(output).unwrap();
    for command in ["login", "deploy", "list", "describe", "delete", "version", "explain"] {
        assert!(help.contains(command), "{command} missing from:\n{help}");
    }
}
