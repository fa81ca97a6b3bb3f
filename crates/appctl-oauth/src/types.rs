use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::DEFAULT_POLL_INTERVAL;

/// Device Authorization Response (RFC 8628 §3.2)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceGrant {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub verification_uri_complete: Option<String>,
    pub expires_in: u64,
    pub interval: Option<u64>,
}

impl DeviceGrant {
    /// How long to wait between token exchanges unless told to slow down.
    pub fn poll_interval(&self) -> Duration {
        self.interval
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL)
    }

    /// How long the device code stays valid.
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.expires_in)
    }

    /// The page the user should open, with the code filled in when the provider supports it.
    pub fn browser_uri(&self) -> &str {
        self.verification_uri_complete
            .as_deref()
            .unwrap_or(&self.verification_uri)
    }
}

/// The `error` field of a token response (RFC 8628 §3.5).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExchangeErrorCode {
    /// No error: the response should carry tokens
    #[default]
    None,
    AuthorizationPending,
    SlowDown,
    ExpiredToken,
    AccessDenied,
    /// Anything this client does not understand
    Other(String),
}

impl From<Option<String>> for ExchangeErrorCode {
    fn from(code: Option<String>) -> Self {
        match code.as_deref() {
            None | Some("") => ExchangeErrorCode::None,
            Some("authorization_pending") => ExchangeErrorCode::AuthorizationPending,
            Some("slow_down") => ExchangeErrorCode::SlowDown,
            Some("expired_token") => ExchangeErrorCode::ExpiredToken,
            Some("access_denied") => ExchangeErrorCode::AccessDenied,
            Some(other) => ExchangeErrorCode::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ExchangeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeErrorCode::None => write!(f, "none"),
            ExchangeErrorCode::AuthorizationPending => write!(f, "authorization_pending"),
            ExchangeErrorCode::SlowDown => write!(f, "slow_down"),
            ExchangeErrorCode::ExpiredToken => write!(f, "expired_token"),
            ExchangeErrorCode::AccessDenied => write!(f, "access_denied"),
            ExchangeErrorCode::Other(code) => write!(f, "{code}"),
        }
    }
}

/// Body of the token endpoint, success and error shapes alike.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    pub id_token: Option<String>,
    pub expires_in: Option<u64>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Outcome of a single token exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenExchangeResult {
    pub access_token: Option<String>,
    pub id_token: Option<String>,
    pub expires_in: u64,
    pub error: ExchangeErrorCode,
    pub error_description: Option<String>,
}

impl From<TokenResponse> for TokenExchangeResult {
    fn from(response: TokenResponse) -> Self {
        TokenExchangeResult {
            access_token: response.access_token,
            id_token: response.id_token.filter(|token| !token.is_empty()),
            expires_in: response.expires_in.unwrap_or_default(),
            error: response.error.into(),
            error_description: response.error_description,
        }
    }
}

impl TokenExchangeResult {
    /// A response still waiting for the user.
    pub fn pending() -> Self {
        TokenExchangeResult {
            error: ExchangeErrorCode::AuthorizationPending,
            ..Default::default()
        }
    }

    /// A response with an error code.
    pub fn failed(error: ExchangeErrorCode) -> Self {
        TokenExchangeResult {
            error,
            ..Default::default()
        }
    }

    /// A successful response.
    pub fn issued(id_token: impl Into<String>, expires_in: u64) -> Self {
        TokenExchangeResult {
            id_token: Some(id_token.into()),
            expires_in,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::{DeviceGrant, ExchangeErrorCode, TokenExchangeResult, TokenResponse};

    fn grant(interval: Option<u64>) -> DeviceGrant {
        DeviceGrant {
            device_code: "dc".into(),
            user_code: "ABCD-EFGH".into(),
            verification_uri: "https://auth.example.com/activate".into(),
            verification_uri_complete: None,
            expires_in: 900,
            interval,
        }
    }

    #[rstest]
    #[case::provided(Some(8), 8)]
    #[case::omitted(None, 5)]
    #[case::zero(Some(0), 5)]
    fn poll_interval_defaults_to_five_seconds(#[case] interval: Option<u64>, #[case] expected: u64) {
        assert_eq!(grant(interval).poll_interval(), Duration::from_secs(expected));
    }

    #[test]
    fn browser_uri_prefers_the_complete_uri() {
        let mut grant = grant(None);
        assert_eq!(grant.browser_uri(), "https://auth.example.com/activate");
        grant.verification_uri_complete = Some("https://auth.example.com/activate?user_code=ABCD-EFGH".into());
        assert_eq!(
            grant.browser_uri(),
            "https://auth.example.com/activate?user_code=ABCD-EFGH"
        );
    }

    #[rstest]
    #[case(None, ExchangeErrorCode::None)]
    #[case(Some("authorization_pending"), ExchangeErrorCode::AuthorizationPending)]
    #[case(Some("slow_down"), ExchangeErrorCode::SlowDown)]
    #[case(Some("expired_token"), ExchangeErrorCode::ExpiredToken)]
    #[case(Some("access_denied"), ExchangeErrorCode::AccessDenied)]
    #[case(Some("invalid_grant"), ExchangeErrorCode::Other("invalid_grant".into()))]
    fn error_codes_are_recognised(#[case] raw: Option<&str>, #[case] expected: ExchangeErrorCode) {
        assert_eq!(ExchangeErrorCode::from(raw.map(String::from)), expected);
    }

    #[test]
    fn an_empty_id_token_counts_as_missing() {
        let result = TokenExchangeResult::from(TokenResponse {
            id_token: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(result.id_token, None);
    }
}
