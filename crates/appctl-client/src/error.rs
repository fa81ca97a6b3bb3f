use thiserror::Error;

/// AppClientError represents all possible failures that can occur during a backend request.
#[derive(Error, Debug)]
pub enum AppClientError {
    /// The app does not exist.
    #[error("Cannot find the app '{name}'.")]
    NotFound {
        /// The app that was asked for.
        name: String,
    },

    /// The backend refused the token (403).
    #[error("Access forbidden. The login token was rejected by the backend.")]
    Forbidden,

    /// The account reached its deploy quota (429). The backend's message is kept verbatim.
    #[error("{0}")]
    RateLimited(String),

    /// The backend failed internally (5xx).
    #[error("The backend encountered an internal server error.")]
    ServerError,

    /// The backend rejected the request (400). The backend's message is kept verbatim.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Nothing is listening at the backend address.
    #[error("The backend server is down. Please try again later.")]
    BackendDown,

    /// The backend host could not be resolved in time.
    #[error("Could not reach '{host}'. Check your network connection.")]
    NetworkUnreachable {
        /// The host that could not be resolved.
        host: String,
    },

    /// The backend answered with a status appctl does not know how to handle.
    #[error("The backend answered with unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The response body was not JSON.
    #[error("Failed to parse the response from the backend")]
    InvalidJson(#[from] serde_json::Error),

    /// The configured backend URL is not usable.
    #[error("The backend URL is invalid")]
    InvalidUrl(#[from] url::ParseError),

    /// Encountered an error sending the request.
    #[error("encountered an error while sending a request")]
    SendRequest(#[from] reqwest::Error),
}
