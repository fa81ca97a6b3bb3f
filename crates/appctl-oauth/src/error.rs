use thiserror::Error;

#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Unable to generate a device code: {0}")]
    DeviceCodeUnavailable(String),

    #[error("The device code expired before the login was approved")]
    Expired,

    #[error("Access denied by user")]
    Denied,

    #[error("Token exchange failed: {0}")]
    ExchangeError(String),

    #[error("Login was cancelled")]
    Cancelled,
}

impl From<appctl_std::Cancelled> for OAuthError {
    fn from(_: appctl_std::Cancelled) -> Self {
        OAuthError::Cancelled
    }
}
