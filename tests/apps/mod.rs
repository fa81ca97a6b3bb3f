mod delete;
mod describe;
mod list;
mod login;
mod login_required;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{TimeDelta, Utc};
use httpmock::MockServer;
use serde_json::{json, Value};

const CLIENT_ID: &str = "appctl-test-client";

/// A config home and a backend for one run of the binary.
pub(crate) struct Harness {
    pub(crate) home: TempDir,
    pub(crate) server: MockServer,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Harness {
            home: TempDir::new().unwrap(),
            server: MockServer::start(),
        }
    }

    /// Writes a session that is valid for the next hour.
    pub(crate) fn logged_in(self) -> Self {
        self.write_session((Utc::now() + TimeDelta::hours(1)).to_rfc3339());
        self
    }

    pub(crate) fn write_session(&self, expires_at: String) {
        let session = json!({ "id_token": token(), "expires_at": expires_at });
        self.home
            .child("config.json")
            .write_str(&session.to_string())
            .unwrap();
    }

    pub(crate) fn appctl(&self) -> Command {
        let mut cmd = Command::cargo_bin("appctl").unwrap();
        cmd.env("APPCTL_CONFIG_HOME", self.home.path())
            .env("APPCTL_APP_URL", self.server.url("/v1/apps"))
            .env("APPCTL_CLIENT_ID", CLIENT_ID)
            .env("APPCTL_TELEMETRY_DISABLED", "1")
            .env("NO_COLOR", "1");
        cmd
    }
}

pub(crate) fn token() -> String {
    let claims = json!({
        "aud": CLIENT_ID,
        "email": "dev@example.com",
        "exp": 4_102_444_800_i64,
    });
    format!(
        "eyJhbGciOiJSUzI1NiJ9.{}.c2lnbmF0dXJl",
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

pub(crate) fn app(name: &str) -> Value {
    json!({
        "metadata": {"name": name, "creationTimestamp": "2024-01-01T10:00:00Z"},
        "spec": {"template": {"spec": {"containers": [
            {"image": "gcr.io/demo/helloworld", "ports": [{"containerPort": 8080}]}
        ]}}},
        "status": {
            "url": format!("https://{name}.example.com"),
            "conditions": [
                {"type": "ConfigurationsReady", "status": "True"},
                {"type": "Ready", "status": "True"},
                {"type": "RoutesReady", "status": "True"}
            ]
        }
    })
}
