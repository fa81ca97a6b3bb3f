use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Whether the command an event describes succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventStatus {
    /// The command did what was asked
    Success,
    /// The command failed
    Failure,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Success => write!(f, "Success"),
            EventStatus::Failure => write!(f, "Failure"),
        }
    }
}

/// A single usage event such as `Deploy-App`.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    name: String,
    status: EventStatus,
    user_id: Option<String>,
    login_type: Option<String>,
    error: Option<String>,
    properties: Map<String, Value>,
}

impl Event {
    /// Starts an event with no properties.
    pub fn new(name: impl Into<String>, status: EventStatus) -> Event {
        Event {
            name: name.into(),
            status,
            user_id: None,
            login_type: None,
            error: None,
            properties: Map::new(),
        }
    }

    /// Attributes the event to a user.
    pub fn with_user(mut self, user_id: impl Into<String>, login_type: impl Into<String>) -> Event {
        self.user_id = Some(user_id.into());
        self.login_type = Some(login_type.into());
        self
    }

    /// Records why the command failed.
    pub fn with_error(mut self, error: impl fmt::Display) -> Event {
        self.error = Some(error.to_string());
        self
    }

    /// Adds a property, replacing any previous value for `key`.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Event {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the command succeeded.
    pub fn status(&self) -> EventStatus {
        self.status
    }

    /// The user the event is attributed to, if anyone is logged in.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A property value by key.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The properties as they are sent, including status, user and error.
    pub fn properties(&self) -> Map<String, Value> {
        let mut properties = self.properties.clone();
        properties.insert("eventstatus".to_string(), self.status.to_string().into());
        properties.insert(
            "id".to_string(),
            self.user_id.clone().unwrap_or_default().into(),
        );
        properties.insert(
            "logintype".to_string(),
            self.login_type.clone().unwrap_or_default().into(),
        );
        properties.insert(
            "error".to_string(),
            self.error.clone().unwrap_or_default().into(),
        );
        properties
    }
}
