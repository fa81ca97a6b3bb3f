use httpmock::prelude::*;
use predicates::prelude::*;

use super::{app, Harness};

#[test]
fn forced_deletes_skip_the_question() {
    let harness = Harness::new().logged_in();
    harness.server.mock(|when, then| {
        when.method(GET).path("/v1/apps/hello");
        then.status(200).json_body(app("hello"));
    });
    let delete = harness.server.mock(|when, then| {
        when.method(DELETE).path("/v1/apps/hello");
        then.status(200);
    });

    harness
        .appctl()
        .args(["delete", "-n", "hello", "--force"])
        .assert()
        .success()
        .stderr(predicate::str::contains("App hello deleted."));
    delete.assert();
}

#[test]
fn answering_no_keeps_the_app() {
    let harness = Harness::new().logged_in();
    let delete = harness.server.mock(|when, then| {
        when.method(DELETE).path("/v1/apps/hello");
        then.status(200);
    });

    harness
        .appctl()
        .args(["delete", "-n", "hello"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("was not deleted"));
    delete.assert_calls(0);
}

#[test]
fn deleting_a_missing_app_fails_before_deleting() {
    let harness = Harness::new().logged_in();
    harness.server.mock(|when, then| {
        when.method(GET).path("/v1/apps/hello");
        then.status(404);
    });
    let delete = harness.server.mock(|when, then| {
        when.method(DELETE).path("/v1/apps/hello");
        then.status(200);
    });

    harness
        .appctl()
        .args(["delete", "-n", "hello", "-f"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E007]"));
    delete.assert_calls(0);
}
