use appctl_std::AppctlStdError;
use thiserror::Error;

use std::io;

/// SputnikError is the type of Error that occured.
#[derive(Error, Debug)]
pub enum SputnikError {
    /// io::Error occurs when any given std::io::Error arises.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// JsonError occurs when an error occurs when serializing/deserializing JSON.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// PathNotUtf8 occurs when Sputnik encounters a file path that is not valid UTF-8
    #[error(transparent)]
    PathNotUtf8(#[from] camino::FromPathBufError),

    /// HttpError occurs when an error occurs while reporting anonymous usage data.
    #[error("Could not report anonymous usage data.")]
    HttpError(#[from] reqwest::Error),

    /// RejectedError occurs when the telemetry endpoint answers with a non-success status.
    #[error("The telemetry endpoint rejected the report with status {0}.")]
    RejectedError(u16),

    /// InvalidUrl occurs when the URL to POST the anonymous usage data cannot be parsed.
    #[error("Could not parse telemetry URL.")]
    InvalidUrl(#[from] url::ParseError),

    /// VersionParseError occurs when the version of the tool cannot be determined.
    #[error("Could not parse the version of the tool.")]
    VersionParseError(#[from] semver::Error),

    /// AdhocError comes from the anyhow crate
    #[error(transparent)]
    AdhocError(#[from] anyhow::Error),

    /// AppctlStdError comes from AppctlStdError
    #[error(transparent)]
    AppctlStdError(#[from] AppctlStdError),
}
