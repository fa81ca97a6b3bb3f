use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError};

/// Typed view of an app document returned by the backend.
///
/// Every field is optional and a field of the wrong shape reads as absent, so
/// building one from any JSON value succeeds. The backend omits `status` and
/// individual conditions while an app is still being reconciled.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppRecord {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub metadata: Option<AppMetadata>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub spec: Option<AppSpec>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub status: Option<AppStatus>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppMetadata {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub creation_timestamp: Option<String>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppSpec {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub template: Option<RevisionTemplate>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RevisionTemplate {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub spec: Option<PodSpec>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PodSpec {
    #[serde_as(deserialize_as = "DefaultOnError<Vec<DefaultOnError>>")]
    pub containers: Vec<Container>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Container {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub image: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError<Vec<DefaultOnError>>")]
    pub ports: Vec<ContainerPort>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerPort {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub container_port: Option<u16>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppStatus {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError<Option<Vec<DefaultOnError>>>")]
    pub conditions: Option<Vec<Condition>>,
}

/// One independently reported readiness condition.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(rename = "type")]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub kind: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub status: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub reason: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub message: Option<String>,
}

impl AppRecord {
    /// Reads whatever can be read from `value`.
    pub fn from_value(value: &serde_json::Value) -> AppRecord {
        AppRecord::deserialize(value).unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref()?.name.as_deref()
    }

    pub fn creation_timestamp(&self) -> Option<&str> {
        self.metadata.as_ref()?.creation_timestamp.as_deref()
    }

    fn first_container(&self) -> Option<&Container> {
        self.spec
            .as_ref()?
            .template
            .as_ref()?
            .spec
            .as_ref()?
            .containers
            .first()
    }

    /// The image of the first container.
    pub fn image(&self) -> Option<&str> {
        self.first_container()?.image.as_deref()
    }

    /// The port the first container listens on.
    pub fn port(&self) -> Option<u16> {
        self.first_container()?
            .ports
            .iter()
            .find_map(|port| port.container_port)
    }

    /// The public URL of the app, once routed.
    pub fn url(&self) -> Option<&str> {
        self.status.as_ref()?.url.as_deref()
    }

    /// The reported conditions, empty while none have been reported.
    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .and_then(|status| status.conditions.as_deref())
            .unwrap_or_default()
    }
}

impl Condition {
    /// Whether the condition is explicitly `"True"`.
    pub fn is_true(&self) -> bool {
        self.status.as_deref() == Some("True")
    }
}
