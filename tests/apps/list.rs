use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};

use super::{app, token, Harness};

#[test]
fn it_lists_apps_in_a_table() {
    let harness = Harness::new().logged_in();
    let mock = harness.server.mock(|when, then| {
        when.method(GET)
            .path("/v1/apps")
            .header("authorization", format!("Bearer {}", token()));
        then.status(200)
            .json_body(json!({ "items": [app("hello"), app("world")] }));
    });

    harness
        .appctl()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("https://hello.example.com"))
        .stdout(predicate::str::contains("world"));
    mock.assert();
}

#[test]
fn it_lists_apps_as_json() {
    let harness = Harness::new().logged_in();
    harness.server.mock(|when, then| {
        when.method(GET).path("/v1/apps");
        then.status(200).json_body(json!({ "items": [app("hello")] }));
    });

    let output = harness
        .appctl()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["data"]["success"], true);
    assert_eq!(json["data"]["apps"][0]["name"], "hello");
    assert_eq!(json["data"]["apps"][0]["ready"], "True");
    assert_eq!(json["data"]["apps"][0]["port"], 8080);
}

#[test]
fn a_rejected_token_is_forbidden() {
    let harness = Harness::new().logged_in();
    harness.server.mock(|when, then| {
        when.method(GET).path("/v1/apps");
        then.status(403);
    });

    harness
        .appctl()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E010]"));
}
