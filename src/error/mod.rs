pub(crate) mod metadata;

pub use metadata::{Code, Metadata, Suggestion};

pub type AppctlResult<T> = std::result::Result<T, AppctlError>;

use appctl_oauth::OAuthError;
use appctl_std::Style;
use calm_io::stderr;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use std::borrow::BorrowMut;
use std::fmt::{self, Display};
use std::io;

use crate::auth::LoginError;
use crate::deploy::DeployError;

/// A specialized `Error` type for appctl that wraps `anyhow`
/// and provides some extra `Metadata` for end users depending
/// on the specific error they encountered.
#[derive(Serialize, Debug)]
pub struct AppctlError {
    #[serde(flatten, serialize_with = "serialize_anyhow")]
    error: anyhow::Error,

    #[serde(flatten)]
    metadata: Metadata,
}

fn serialize_anyhow<S>(error: &anyhow::Error, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut data = serializer.serialize_struct("error", 1)?;
    data.serialize_field("message", &error.to_string())?;
    data.end()
}

impl AppctlError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let mut error = error.into();
        let metadata = Metadata::from(error.borrow_mut());

        Self { error, metadata }
    }

    pub fn set_suggestion(&mut self, suggestion: Suggestion) {
        self.metadata.suggestion = Some(suggestion);
    }

    pub fn suggestion(&self) -> Option<Suggestion> {
        self.metadata.suggestion.clone()
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn code(&self) -> Option<Code> {
        self.metadata.code
    }

    /// Ctrl-C ends a command quietly.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self.error.downcast_ref::<DeployError>(),
            Some(DeployError::Cancelled)
        ) || matches!(
            self.error.downcast_ref::<OAuthError>(),
            Some(OAuthError::Cancelled)
        ) || matches!(
            self.error.downcast_ref::<LoginError>(),
            Some(LoginError::Authorization(OAuthError::Cancelled))
        ) || self.error.downcast_ref::<appctl_std::Cancelled>().is_some()
    }

    pub fn print(&self) -> io::Result<()> {
        stderr!("{}", self)?;
        Ok(())
    }

    pub(crate) fn get_internal_error_json(&self) -> Value {
        json!(self)
    }
}

impl Display for AppctlError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error_descriptor_message = if let Some(code) = &self.metadata.code {
            format!("error[{}]:", code)
        } else {
            "error:".to_string()
        };
        let error_descriptor = Style::ErrorPrefix.paint(&error_descriptor_message);

        if self.metadata.skip_printing_cause {
            writeln!(formatter, "{} {}", error_descriptor, &self.error)?;
        } else {
            writeln!(formatter, "{} {:?}", error_descriptor, &self.error)?;
        }

        if let Some(suggestion) = &self.metadata.suggestion {
            writeln!(formatter, "        {}", suggestion)?;
        }
        Ok(())
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppctlError {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

#[cfg(test)]
mod tests {
    use appctl_client::AppClientError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn errors_serialize_with_their_code_and_suggestion() {
        let error = AppctlError::new(DeployError::AlreadyExists {
            name: "hello".to_string(),
        });
        let actual = error.get_internal_error_json();

        assert_eq!(actual["code"], json!("E004"));
        assert_eq!(
            actual["message"],
            json!("An app named 'hello' already exists. Please use a different name.")
        );
        assert!(actual["suggestion"].as_str().is_some());
    }

    #[test]
    fn display_leads_with_the_code() {
        let error = AppctlError::new(AppClientError::NotFound {
            name: "hello".to_string(),
        });
        let printed = error.to_string();
        assert!(printed.contains("E007"), "{printed}");
        assert!(printed.contains("Cannot find the app 'hello'."), "{printed}");
        assert!(printed.contains("appctl list"), "{printed}");
    }

    #[test]
    fn uncoded_errors_have_a_plain_prefix() {
        let error = AppctlError::new(anyhow::anyhow!("boom"));
        assert!(error.code().is_none());
        let printed = error.to_string();
        assert!(printed.contains("error:"), "{printed}");
        assert!(printed.contains("boom"), "{printed}");
    }

    #[test]
    fn cancellation_is_recognised() {
        assert!(AppctlError::new(DeployError::Cancelled).is_cancellation());
        assert!(!AppctlError::new(anyhow::anyhow!("boom")).is_cancellation());
    }
}
