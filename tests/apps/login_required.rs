use predicates::prelude::*;
use rstest::rstest;
use serde_json::Value;

use super::Harness;

#[rstest]
#[case::list(&["list"])]
#[case::describe(&["describe", "-n", "hello"])]
#[case::deploy(&["deploy", "-n", "hello", "-i", "gcr.io/demo/helloworld"])]
#[case::delete(&["delete", "-n", "hello", "--force"])]
fn backend_commands_need_a_login(#[case] args: &[&str]) {
    let harness = Harness::new();
    let backend = harness.server.mock(|when, then| {
        when.path_includes("/v1/apps");
        then.status(200);
    });

    harness
        .appctl()
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E001]"))
        .stderr(predicate::str::contains("appctl login"));
    backend.assert_calls(0);
}

#[rstest]
#[case::bad_name(&["deploy", "-n", "Bad_Name", "-i", "img"], "Invalid app name 'Bad_Name'")]
#[case::no_image(&["deploy", "-n", "hello"], "App image not specified.")]
fn deploy_input_is_checked_before_the_login(#[case] args: &[&str], #[case] message: &str) {
    let harness = Harness::new();
    let backend = harness.server.mock(|when, then| {
        when.path_includes("/v1/apps");
        then.status(200);
    });

    harness
        .appctl()
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E003]"))
        .stderr(predicate::str::contains(message))
        .stderr(predicate::str::contains("error[E001]").not());
    backend.assert_calls(0);
}

#[test]
fn an_expired_login_is_not_used() {
    let harness = Harness::new();
    harness.write_session("2020-01-01T00:00:00Z".to_string());

    harness
        .appctl()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Your login has expired."));
}

#[test]
fn errors_can_be_printed_as_json() {
    let harness = Harness::new();
    let output = harness
        .appctl()
        .args(["list", "--format", "json"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["json_version"], "1");
    assert_eq!(json["data"]["success"], false);
    assert_eq!(json["error"]["code"], "E001");
}

#[test]
fn blank_settings_are_reported() {
    let harness = Harness::new();
    harness
        .appctl()
        .env("APPCTL_AUTH_DOMAIN", "")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E002]"))
        .stderr(predicate::str::contains("APPCTL_AUTH_DOMAIN"));
}
