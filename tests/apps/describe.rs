use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

use super::{app, Harness};

#[test]
fn it_prints_the_whole_document() {
    let harness = Harness::new().logged_in();
    harness.server.mock(|when, then| {
        when.method(GET).path("/v1/apps/hello");
        then.status(200).json_body(app("hello"));
    });

    let output = harness
        .appctl()
        .args(["describe", "-n", "hello"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let document: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(document, app("hello"));
}

#[test]
fn missing_apps_are_not_found() {
    let harness = Harness::new().logged_in();
    harness.server.mock(|when, then| {
        when.method(GET).path("/v1/apps/nope");
        then.status(404);
    });

    harness
        .appctl()
        .args(["describe", "-n", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E007]"))
        .stderr(predicate::str::contains("Cannot find the app 'nope'."));
}

#[test]
fn invalid_names_never_reach_the_backend() {
    let harness = Harness::new().logged_in();
    let mock = harness.server.mock(|when, then| {
        when.path_includes("/v1/apps");
        then.status(200);
    });

    harness
        .appctl()
        .args(["describe", "-n", "Hello_World"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E003]"));
    mock.assert_calls(0);
}
