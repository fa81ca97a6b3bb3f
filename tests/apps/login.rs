use httpmock::Method::POST;
use predicates::prelude::*;
use serde_json::{json, Value};

use super::{token, Harness};

#[test]
fn a_confirmed_login_is_saved() {
    let harness = Harness::new();
    let device_code = harness.server.mock(|when, then| {
        when.method(POST).path("/oauth/device/code");
        then.status(200).json_body(json!({
            "device_code": "dev-code",
            "user_code": "WDJB-MJHT",
            "verification_uri": "https://auth.example.com/activate",
            "expires_in": 900,
            "interval": 1
        }));
    });
    let exchange = harness.server.mock(|when, then| {
        when.method(POST)
            .path("/oauth/token")
            .form_urlencoded_tuple("device_code", "dev-code");
        then.status(200).json_body(json!({
            "id_token": token(),
            "expires_in": 86400
        }));
    });
    let registered = harness.server.mock(|when, then| {
        when.method(POST)
            .path("/v1/apps/login")
            .header("authorization", format!("Bearer {}", token()));
        then.status(200);
    });

    harness
        .appctl()
        .env("APPCTL_AUTH_DOMAIN", harness.server.base_url())
        .args(["login", "--no-browser"])
        .assert()
        .success()
        .stderr(predicate::str::contains("WDJB-MJHT"))
        .stderr(predicate::str::contains("https://auth.example.com/activate"))
        .stderr(predicate::str::contains("Waiting for the login to be confirmed..."));

    device_code.assert();
    exchange.assert();
    registered.assert();
    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(harness.home.path().join("config.json")).unwrap())
            .unwrap();
    assert_eq!(saved["id_token"], json!(token()));
}
