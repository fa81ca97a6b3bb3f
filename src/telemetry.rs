use std::fmt::Display;

use camino::Utf8PathBuf;
use houston::Session;
use reqwest::Client;
use sputnik::{Event, EventStatus, Report, SputnikError};
use url::Url;

use crate::deploy::AppSummary;
use crate::utils::client::user_agent;
use crate::utils::env::{AppctlEnv, AppctlEnvKey};

pub const LOGIN: &str = "Login";
pub const DEPLOY_APP: &str = "Deploy-App";
pub const LIST_APPS: &str = "List-Apps";
pub const DESCRIBE_APP: &str = "Describe-App";
pub const DELETE_APP: &str = "Delete-App";

const SEGMENT_BATCH_URL: &str = "https://api.segment.io/v1/batch";

/// Without a write key baked in at build time, nothing is reported.
const DEFAULT_WRITE_KEY: &str = match option_env!("APPCTL_SEGMENT_WRITE_KEY") {
    Some(key) => key,
    None => "",
};

/// The person an event is attributed to, read from their login token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub login_type: String,
}

impl User {
    pub fn from_session(session: &Session) -> Option<User> {
        let claims = session.claims().ok()?;
        let (id, login_type) = claims.identity()?;
        Some(User {
            id: id.to_string(),
            login_type: login_type.to_string(),
        })
    }
}

/// Describes how a command ended, with the app it touched if one was seen.
pub fn outcome_event<T, E: Display>(
    name: &str,
    result: &Result<T, E>,
    user: Option<&User>,
    app: Option<&AppSummary>,
) -> Event {
    let mut event = match result {
        Ok(_) => Event::new(name, EventStatus::Success),
        Err(error) => Event::new(name, EventStatus::Failure).with_error(error),
    };
    if let Some(user) = user {
        event = event.with_user(&user.id, &user.login_type);
    }
    if let Some(app) = app {
        event = event
            .with_property("appname", app.name.as_str())
            .with_property("image", app.image.as_str())
            .with_property("url", app.url.as_str())
            .with_property(
                "port",
                app.port.map(|port| port.to_string()).unwrap_or_default(),
            )
            .with_property("appstatus", app.ready.as_str());
    }
    event
}

/// Tells sputnik where and how appctl reports.
pub struct AppctlReport {
    env: AppctlEnv,
    machine_id_path: Utf8PathBuf,
    client: Client,
}

impl AppctlReport {
    pub fn new(env: AppctlEnv, machine_id_path: Utf8PathBuf, client: Client) -> AppctlReport {
        AppctlReport {
            env,
            machine_id_path,
            client,
        }
    }
}

impl Report for AppctlReport {
    fn is_telemetry_enabled(&self) -> Result<bool, SputnikError> {
        let disabled = self.env.is_set(AppctlEnvKey::TelemetryDisabled)?;
        Ok(!disabled && !self.write_key().is_empty())
    }

    fn endpoint(&self) -> Result<Url, SputnikError> {
        let url = self
            .env
            .get_non_empty(AppctlEnvKey::TelemetryUrl)?
            .unwrap_or_else(|| SEGMENT_BATCH_URL.to_string());
        Ok(url.parse()?)
    }

    fn write_key(&self) -> String {
        self.env
            .get_non_empty(AppctlEnvKey::TelemetryWriteKey)
            .ok()
            .flatten()
            .unwrap_or_else(|| DEFAULT_WRITE_KEY.to_string())
    }

    fn tool_name(&self) -> String {
        crate::PKG_NAME.to_string()
    }

    fn version(&self) -> String {
        crate::PKG_VERSION.to_string()
    }

    fn user_agent(&self) -> String {
        user_agent()
    }

    fn machine_id_config(&self) -> Result<Utf8PathBuf, SputnikError> {
        Ok(self.machine_id_path.clone())
    }

    fn client(&self) -> Client {
        self.client.clone()
    }
}
