use appctl_client::AppClientError;
use thiserror::Error;

use super::InvalidAppName;
use crate::auth::AuthRequired;

/// Ways `appctl deploy` can fail.
///
/// A deployment that is merely slow is not an error; see
/// [`DeploymentOutcome`](super::DeploymentOutcome).
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("App {field} not specified.")]
    MissingField { field: &'static str },

    #[error(transparent)]
    InvalidName(#[from] InvalidAppName),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    AuthRequired(#[from] AuthRequired),

    #[error("An app named '{name}' already exists. Please use a different name.")]
    AlreadyExists { name: String },

    /// The account reached its deploy quota. The backend's words are kept.
    #[error("{0}")]
    RateLimited(String),

    #[error("Failed to deploy app '{name}': unable to fetch image '{image}'.")]
    InvalidImage { name: String, image: String },

    #[error("Failed to deploy app '{name}'.")]
    Backend {
        name: String,
        #[source]
        source: AppClientError,
    },

    #[error("Deployment was cancelled. The app may still be created; check with `appctl list`.")]
    Cancelled,
}

impl From<appctl_std::Cancelled> for DeployError {
    fn from(_: appctl_std::Cancelled) -> Self {
        DeployError::Cancelled
    }
}
