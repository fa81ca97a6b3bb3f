use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::types::TokenResponse;
use crate::{DeviceGrant, OAuthError, TokenExchangeResult};

/// grant type for polling the token endpoint (RFC 8628 §3.4)
pub const DEVICE_CODE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// scopes needed for an id token that identifies the user
pub const REQUIRED_SCOPES: [&str; 4] = ["openid", "profile", "email", "offline_access"];

/// Something that issues device codes and exchanges them for tokens.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Starts a device authorization.
    async fn get_device_code(&self) -> Result<DeviceGrant, OAuthError>;

    /// Asks whether the user has approved `device_code` yet.
    ///
    /// Protocol-level answers, including errors such as `authorization_pending`,
    /// come back as `Ok`. `Err(OAuthError::HttpError)` means the request never
    /// got an answer.
    async fn exchange_token(&self, device_code: &str) -> Result<TokenExchangeResult, OAuthError>;
}

/// Where the identity provider lives and who appctl is to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Tenant domain such as `example.us.auth0.com`, or a full base URL
    pub domain: String,
    pub client_id: String,
    pub scopes: Vec<String>,
}

impl ProviderConfig {
    pub fn new(domain: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            client_id: client_id.into(),
            scopes: REQUIRED_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn base_url(&self) -> Result<Url, OAuthError> {
        let domain = self.domain.trim_end_matches('/');
        let base = if domain.starts_with("http://") || domain.starts_with("https://") {
            format!("{domain}/")
        } else {
            format!("https://{domain}/")
        };
        Ok(Url::parse(&base)?)
    }

    pub fn device_code_url(&self) -> Result<Url, OAuthError> {
        Ok(self.base_url()?.join("oauth/device/code")?)
    }

    pub fn token_url(&self) -> Result<Url, OAuthError> {
        Ok(self.base_url()?.join("oauth/token")?)
    }
}

/// Identity provider reached over HTTP with form-encoded requests.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    config: ProviderConfig,
}

impl HttpIdentityProvider {
    pub fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn get_device_code(&self) -> Result<DeviceGrant, OAuthError> {
        let url = self.config.device_code_url()?;
        let scope = self.config.scopes.join(" ");
        tracing::debug!(%url, "requesting a device code");

        let response = self
            .client
            .post(url)
            .form(&[("client_id", self.config.client_id.as_str()), ("scope", &scope)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: TokenResponse = response.json().await.unwrap_or_default();
            let reason = body
                .error_description
                .or(body.error)
                .unwrap_or_else(|| format!("the identity provider answered {status}"));
            return Err(OAuthError::DeviceCodeUnavailable(reason));
        }

        response
            .json::<DeviceGrant>()
            .await
            .map_err(|e| OAuthError::DeviceCodeUnavailable(format!("unreadable response: {e}")))
    }

    async fn exchange_token(&self, device_code: &str) -> Result<TokenExchangeResult, OAuthError> {
        let url = self.config.token_url()?;
        let response = self
            .client
            .post(url)
            .form(&[
                ("grant_type", DEVICE_CODE_GRANT_TYPE),
                ("device_code", device_code),
                ("client_id", self.config.client_id.as_str()),
            ])
            .send()
            .await?;

        // error answers such as authorization_pending arrive with 4xx statuses
        let status = response.status();
        let body = response.bytes().await?;
        match serde_json::from_slice::<TokenResponse>(&body) {
            Ok(token) => Ok(token.into()),
            Err(e) => Err(OAuthError::ExchangeError(format!(
                "the identity provider answered {status} with an unreadable body: {e}"
            ))),
        }
    }
}
