use chrono::{DateTime, Utc};
use ci_info::types::Vendor as CiVendor;
use reqwest::Client;
use semver::Version;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;
use uuid::Uuid;
use wsl::is_wsl;

use std::env;
use std::mem;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::{Event, Report, SputnikError, Telemetry};

/// Timeout for reporting telemetry. Note that this includes the entire time to make the request
/// and receive the response, including on the client side. This is not just the server latency.
pub const REPORT_TIMEOUT: Duration = Duration::from_secs(1);

/// Collects the events of one CLI invocation and reports them in a single batch.
#[derive(Debug)]
pub struct Reporter {
    /// generated once per machine and stored in the config home
    machine_id: Uuid,

    /// sent alongside every batch
    context: Context,

    /// where the telemetry data is being reported to
    reporting_info: ReportingInfo,

    /// the reqwest Client sputnik uses to send telemetry data
    client: Client,

    /// events waiting for the next flush
    queue: Mutex<Vec<Queued>>,
}

#[derive(Debug)]
struct Queued {
    event: Event,
    timestamp: DateTime<Utc>,
}

/// Information about the tool and platform the events come from
#[derive(Debug, Serialize)]
struct Context {
    library: Library,
    os: Platform,
}

#[derive(Debug, Serialize)]
struct Library {
    name: String,
    version: Version,
}

/// Platform represents the platform the CLI is being run from
#[derive(Debug, Serialize)]
struct Platform {
    /// the platform from which the command was run (i.e. linux, macOS, windows or even wsl)
    name: String,

    /// the cpu arch used
    arch: String,

    /// if we think this command is being run in CI
    continuous_integration: Option<CiVendor>,
}

/// ReportingInfo represents information about where the telemetry data
/// should be reported to
#[derive(Debug)]
struct ReportingInfo {
    is_telemetry_enabled: bool,
    endpoint: Url,
    user_agent: String,
    write_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Batch<'a> {
    batch: Vec<Track>,
    context: &'a Context,
    sent_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Track {
    #[serde(rename = "type")]
    kind: &'static str,
    event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    anonymous_id: Uuid,
    properties: Map<String, Value>,
    timestamp: DateTime<Utc>,
}

impl Reporter {
    /// creates a Reporter for the tool described by `app`.
    pub fn new<T: Report>(app: &T) -> Result<Reporter, SputnikError> {
        let machine_id = app.machine_id()?;
        let reporting_info = ReportingInfo {
            is_telemetry_enabled: app.is_telemetry_enabled()?,
            endpoint: app.endpoint()?,
            user_agent: app.user_agent(),
            write_key: app.write_key(),
        };

        let continuous_integration = if ci_info::is_ci() {
            ci_info::get().vendor
        } else {
            None
        };

        let os = if is_wsl() {
            "wsl".to_string()
        } else {
            env::consts::OS.to_string()
        };

        let context = Context {
            library: Library {
                name: app.tool_name(),
                version: Version::parse(app.version().as_str())?,
            },
            os: Platform {
                name: os,
                arch: env::consts::ARCH.to_string(),
                continuous_integration,
            },
        };

        Ok(Reporter {
            machine_id,
            context,
            reporting_info,
            client: app.client(),
            queue: Mutex::new(Vec::new()),
        })
    }

    /// how many events are waiting to be reported.
    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// sends every queued event to the endpoint defined in ReportingInfo.
    pub async fn flush(&self) -> Result<(), SputnikError> {
        let queued = mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner));
        if queued.is_empty() || !self.reporting_info.is_telemetry_enabled {
            return Ok(());
        }
        if cfg!(debug_assertions) {
            tracing::debug!("Skipping telemetry reporting");
            return Ok(());
        }

        let body = serde_json::to_string(&self.batch(queued))?;
        tracing::debug!("POSTing to {}", &self.reporting_info.endpoint);
        tracing::debug!("{}", body);
        let response = self
            .client
            .post(self.reporting_info.endpoint.clone())
            .basic_auth(&self.reporting_info.write_key, Some(""))
            .body(body)
            .header("User-Agent", &self.reporting_info.user_agent)
            .header("Content-Type", "application/json")
            .timeout(REPORT_TIMEOUT)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SputnikError::RejectedError(status.as_u16()))
        }
    }

    fn batch(&self, queued: Vec<Queued>) -> Batch<'_> {
        let batch = queued
            .into_iter()
            .map(|Queued { event, timestamp }| Track {
                kind: "track",
                event: event.name().to_string(),
                user_id: event.user_id().map(|id| format!("appctl-{id}")),
                anonymous_id: self.machine_id,
                properties: event.properties(),
                timestamp,
            })
            .collect();
        Batch {
            batch,
            context: &self.context,
            sent_at: Utc::now(),
        }
    }
}

impl Telemetry for Reporter {
    fn emit(&self, event: Event) {
        tracing::debug!(event = %event.name(), status = %event.status(), "queueing telemetry event");
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Queued {
                event,
                timestamp: Utc::now(),
            });
    }
}
