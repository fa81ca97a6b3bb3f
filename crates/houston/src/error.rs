use std::io;

use appctl_std::AppctlStdError;
use thiserror::Error;

/// HoustonProblem is the type of Error that occured.
#[derive(Error, Debug)]
pub enum HoustonProblem {
    /// DefaultConfigDirNotFound occurs when the default OS config can't be found.
    #[error("Could not determine default OS configuration directory.")]
    DefaultConfigDirNotFound,

    /// InvalidOverrideConfigDir occurs when a user provides a path to a non-directory.
    #[error("'{0}' already exists and is not a directory.")]
    InvalidOverrideConfigDir(String),

    /// NoSession occurs when nobody has logged in on this machine yet.
    #[error("No login session was found at '{0}'.")]
    NoSession(String),

    /// SessionExpired occurs when the stored session can no longer be used.
    #[error("The login session has expired.")]
    SessionExpired,

    /// InvalidToken occurs when the stored token is not a token issued for appctl.
    #[error("The stored login token is invalid: {0}.")]
    InvalidToken(String),

    /// CorruptedSession occurs when the session file can't be parsed.
    #[error("The login session stored at '{path}' could not be read.")]
    CorruptedSession {
        /// Where the session was read from
        path: String,
        /// Why parsing failed
        source: serde_json::Error,
    },

    /// PathNotUtf8 occurs when Houston encounters a file path that is not valid UTF-8
    #[error(transparent)]
    PathNotUtf8(#[from] camino::FromPathBufError),

    /// JsonSerialization occurs when a session can't be serialized to a String.
    #[error(transparent)]
    JsonSerialization(#[from] serde_json::Error),

    /// io::Error occurs when any given std::io::Error arises.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// AppctlStdError comes from AppctlStdError
    #[error(transparent)]
    AppctlStdError(#[from] AppctlStdError),
}
