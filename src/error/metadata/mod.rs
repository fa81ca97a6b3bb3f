pub(crate) mod code;
mod suggestion;

pub use code::Code;
pub use suggestion::Suggestion;

use appctl_client::AppClientError;
use appctl_oauth::OAuthError;
use houston::HoustonProblem;
use serde::Serialize;

use crate::auth::{AuthRequired, LoginError};
use crate::deploy::{DeployError, InvalidAppName};
use crate::utils::client::SecretsNotSet;

/// Metadata contains extra information about specific errors
/// Currently this includes an optional error `Code`
/// and an optional `Suggestion`
#[derive(Default, Debug, Clone, Serialize)]
pub struct Metadata {
    #[serde(serialize_with = "serialize_suggestion")]
    pub suggestion: Option<Suggestion>,
    pub code: Option<Code>,

    #[serde(skip_serializing)]
    pub skip_printing_cause: bool,
}

fn serialize_suggestion<S>(suggestion: &Option<Suggestion>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match suggestion {
        Some(suggestion) => serializer.serialize_str(&suggestion.to_string()),
        None => serializer.serialize_none(),
    }
}

impl Metadata {
    fn new(suggestion: Option<Suggestion>, code: Option<Code>) -> Self {
        Metadata {
            suggestion,
            code,
            skip_printing_cause: false,
        }
    }
}

/// Part of the backend's answer when it can't make sense of an image reference.
const IMAGE_PARSE_FAILURE: &str = "failed to parse image";

fn from_client_error(error: &AppClientError) -> Metadata {
    let (suggestion, code) = match error {
        AppClientError::BadRequest(message)
            if message.to_lowercase().contains(IMAGE_PARSE_FAILURE) =>
        {
            (Some(Suggestion::CheckImagePath), Some(Code::E003))
        }
        AppClientError::NotFound { .. } => (Some(Suggestion::ListApps), Some(Code::E007)),
        AppClientError::Forbidden => (Some(Suggestion::Login), Some(Code::E010)),
        AppClientError::RateLimited(_) => (Some(Suggestion::DeleteUnusedApps), Some(Code::E005)),
        AppClientError::BadRequest(_) => (Some(Suggestion::FixInput), Some(Code::E003)),
        AppClientError::ServerError | AppClientError::BackendDown => {
            (Some(Suggestion::TryAgainLater), Some(Code::E009))
        }
        AppClientError::NetworkUnreachable { .. } => {
            (Some(Suggestion::CheckNetwork), Some(Code::E008))
        }
        AppClientError::InvalidUrl(_) => (Some(Suggestion::CheckNetwork), Some(Code::E002)),
        AppClientError::UnexpectedStatus { .. }
        | AppClientError::InvalidJson(_)
        | AppClientError::SendRequest(_) => {
            (Some(Suggestion::RerunWithDebugLogs), Some(Code::E015))
        }
    };
    Metadata::new(suggestion, code)
}

fn from_oauth_error(error: &OAuthError) -> Metadata {
    let (suggestion, code) = match error {
        OAuthError::Expired => (Some(Suggestion::RetryLogin), Some(Code::E011)),
        OAuthError::Denied => (Some(Suggestion::RetryLogin), Some(Code::E012)),
        OAuthError::Cancelled => (None, None),
        OAuthError::HttpError(_)
        | OAuthError::UrlError(_)
        | OAuthError::DeviceCodeUnavailable(_)
        | OAuthError::ExchangeError(_) => (Some(Suggestion::CheckNetwork), Some(Code::E013)),
    };
    Metadata::new(suggestion, code)
}

/// `Metadata` structs can be created from an `anyhow::Error`
/// This works by downcasting the errors to their underlying types
/// and creating `Suggestion`s and `Code`s where applicable
impl From<&mut anyhow::Error> for Metadata {
    fn from(error: &mut anyhow::Error) -> Self {
        if let Some(deploy_error) = error.downcast_ref::<DeployError>() {
            let (suggestion, code) = match deploy_error {
                DeployError::MissingField { .. }
                | DeployError::InvalidName(_)
                | DeployError::InvalidInput(_) => (Some(Suggestion::FixInput), Some(Code::E003)),
                DeployError::AuthRequired(_) => (Some(Suggestion::Login), Some(Code::E001)),
                DeployError::AlreadyExists { .. } => {
                    (Some(Suggestion::UseDifferentName), Some(Code::E004))
                }
                DeployError::RateLimited(_) => {
                    (Some(Suggestion::DeleteUnusedApps), Some(Code::E005))
                }
                DeployError::InvalidImage { name, .. } => (
                    Some(Suggestion::CheckImage { name: name.clone() }),
                    Some(Code::E006),
                ),
                DeployError::Backend { source, .. } => return from_client_error(source),
                DeployError::Cancelled => (None, None),
            };
            return Metadata::new(suggestion, code);
        }

        if let Some(login_error) = error.downcast_ref::<LoginError>() {
            return match login_error {
                LoginError::Authorization(oauth_error) => from_oauth_error(oauth_error),
                LoginError::SessionNotSaved(_) => {
                    Metadata::new(Some(Suggestion::SetConfigHome), Some(Code::E016))
                }
                LoginError::BackendUnavailable(_) => {
                    Metadata::new(Some(Suggestion::TryAgainLater), Some(Code::E014))
                }
            };
        }

        if let Some(oauth_error) = error.downcast_ref::<OAuthError>() {
            return from_oauth_error(oauth_error);
        }

        if error.downcast_ref::<AuthRequired>().is_some() {
            let mut metadata = Metadata::new(Some(Suggestion::Login), Some(Code::E001));
            metadata.skip_printing_cause = true;
            return metadata;
        }

        if let Some(client_error) = error.downcast_ref::<AppClientError>() {
            let mut metadata = from_client_error(client_error);
            metadata.skip_printing_cause = matches!(
                client_error,
                AppClientError::NotFound { .. }
                    | AppClientError::RateLimited(_)
                    | AppClientError::BackendDown
                    | AppClientError::NetworkUnreachable { .. }
            );
            return metadata;
        }

        if error.downcast_ref::<InvalidAppName>().is_some() {
            let mut metadata = Metadata::new(Some(Suggestion::FixInput), Some(Code::E003));
            metadata.skip_printing_cause = true;
            return metadata;
        }

        if error.downcast_ref::<SecretsNotSet>().is_some() {
            let mut metadata =
                Metadata::new(Some(Suggestion::UnsetBlankSettings), Some(Code::E002));
            metadata.skip_printing_cause = true;
            return metadata;
        }

        if let Some(houston_problem) = error.downcast_ref::<HoustonProblem>() {
            let (suggestion, code) = match houston_problem {
                HoustonProblem::DefaultConfigDirNotFound
                | HoustonProblem::InvalidOverrideConfigDir(_)
                | HoustonProblem::PathNotUtf8(_)
                | HoustonProblem::IoError(_)
                | HoustonProblem::AppctlStdError(_) => {
                    (Some(Suggestion::SetConfigHome), Some(Code::E016))
                }
                HoustonProblem::NoSession(_)
                | HoustonProblem::SessionExpired
                | HoustonProblem::InvalidToken(_)
                | HoustonProblem::CorruptedSession { .. } => {
                    (Some(Suggestion::Login), Some(Code::E001))
                }
                HoustonProblem::JsonSerialization(_) => (None, None),
            };
            return Metadata::new(suggestion, code);
        }

        Metadata::default()
    }
}
