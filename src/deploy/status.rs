use std::time::Duration;

use appctl_client::{AppRecord, Condition};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What the backend writes into the configuration condition when the
/// container image could not be pulled.
pub const INVALID_IMAGE_MARKER: &str = "Unable to fetch image";

/// The reason reported for an image that can never be pulled.
pub const INVALID_IMAGE_REASON: &str = "InvalidImage";

/// A condition is looked up by its `type`, falling back to the position the
/// backend reports it at when the entry carries no type.
struct ConditionKind {
    kind: &'static str,
    position: usize,
}

const CONFIGURATION: ConditionKind = ConditionKind {
    kind: "ConfigurationsReady",
    position: 0,
};
const READINESS: ConditionKind = ConditionKind {
    kind: "Ready",
    position: 1,
};
const ROUTING: ConditionKind = ConditionKind {
    kind: "RoutesReady",
    position: 2,
};

impl ConditionKind {
    fn find<'a>(&self, conditions: &'a [Condition]) -> Option<&'a Condition> {
        conditions
            .iter()
            .find(|condition| condition.kind.as_deref() == Some(self.kind))
            .or_else(|| {
                conditions
                    .get(self.position)
                    .filter(|condition| condition.kind.is_none())
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady(String),
    InvalidImage,
}

/// The verdict on one fetched app document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub readiness: Readiness,
    pub url: Option<String>,
}

impl Interpretation {
    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    pub fn is_invalid_image(&self) -> bool {
        self.readiness == Readiness::InvalidImage
    }

    /// Empty once the app is ready.
    pub fn reason(&self) -> &str {
        match &self.readiness {
            Readiness::Ready => "",
            Readiness::NotReady(reason) => reason,
            Readiness::InvalidImage => INVALID_IMAGE_REASON,
        }
    }
}

/// Decides whether a deployed app is serving traffic.
///
/// An app is ready only when its configuration, readiness and routing
/// conditions are all `"True"`. Anything missing counts as not ready. An
/// invalid image in the configuration message wins over every other
/// condition.
pub fn interpret(record: &AppRecord) -> Interpretation {
    let conditions = record.conditions();
    let configuration = CONFIGURATION.find(conditions);
    let readiness = READINESS.find(conditions);
    let routing = ROUTING.find(conditions);

    let image_unavailable = configuration
        .and_then(|condition| condition.message.as_deref())
        .is_some_and(|message| message.contains(INVALID_IMAGE_MARKER));

    let readiness = if image_unavailable {
        Readiness::InvalidImage
    } else if [configuration, readiness, routing]
        .into_iter()
        .all(|condition| condition.is_some_and(Condition::is_true))
    {
        Readiness::Ready
    } else {
        Readiness::NotReady(not_ready_reason(readiness))
    };

    Interpretation {
        readiness,
        url: record
            .url()
            .filter(|url| !url.is_empty())
            .map(str::to_string),
    }
}

fn not_ready_reason(readiness: Option<&Condition>) -> String {
    let Some(condition) = readiness else {
        return String::new();
    };
    let parts: Vec<&str> = [condition.reason.as_deref(), condition.message.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();
    parts.join(": ")
}

/// One row of `appctl list`, also attached to telemetry events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppSummary {
    pub name: String,
    pub url: String,
    pub image: String,
    pub port: Option<u16>,
    /// The readiness condition's status: `True`, `False` or `Unknown`.
    pub ready: String,
    pub creation_timestamp: String,
    pub age: String,
}

impl AppSummary {
    pub fn from_record(record: &AppRecord, now: DateTime<Utc>) -> AppSummary {
        let creation_timestamp = record.creation_timestamp().unwrap_or_default().to_string();
        let age = DateTime::parse_from_rfc3339(&creation_timestamp)
            .map(|created| format_age(now.signed_duration_since(created)))
            .unwrap_or_default();
        AppSummary {
            name: record.name().unwrap_or_default().to_string(),
            url: record.url().unwrap_or_default().to_string(),
            image: record.image().unwrap_or_default().to_string(),
            port: record.port(),
            ready: READINESS
                .find(record.conditions())
                .and_then(|condition| condition.status.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            creation_timestamp,
            age,
        }
    }
}

/// Coarsens long ages so `3days 4h` is printed rather than `3days 4h 12m 9s`.
fn format_age(elapsed: chrono::TimeDelta) -> String {
    let seconds = u64::try_from(elapsed.num_seconds()).unwrap_or_default();
    let rounded = match seconds {
        s if s >= 86_400 => s - s % 3_600,
        s if s >= 3_600 => s - s % 60,
        s => s,
    };
    humantime::format_duration(Duration::from_secs(rounded)).to_string()
}
