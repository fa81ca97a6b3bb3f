use std::fmt;

use serde::Serialize;

/// An environment variable handed to the app's container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Body of the create-app request.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CreateAppRequest {
    pub name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Sent as a string, the backend parses it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
}

impl CreateAppRequest {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            username: None,
            password: None,
            port: None,
            envs: Vec::new(),
        }
    }
}

impl fmt::Debug for CreateAppRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateAppRequest")
            .field("name", &self.name)
            .field("image", &self.image)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("port", &self.port)
            .field("envs", &self.envs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CreateAppRequest, EnvVar};

    #[test]
    fn optional_fields_are_left_out() {
        let request = CreateAppRequest::new("hello", "nginx");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "hello", "image": "nginx"})
        );
    }

    #[test]
    fn everything_is_sent_when_set() {
        let mut request = CreateAppRequest::new("hello", "registry.example.com/hello");
        request.username = Some("robot".into());
        request.password = Some("hunter2".into());
        request.port = Some("8080".into());
        request.envs = vec![EnvVar::new("MODE", "prod")];
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "hello",
                "image": "registry.example.com/hello",
                "username": "robot",
                "password": "hunter2",
                "port": "8080",
                "envs": [{"key": "MODE", "value": "prod"}]
            })
        );
    }
}
