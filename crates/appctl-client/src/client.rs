use async_trait::async_trait;
use houston::Session;
use reqwest::{Method, RequestBuilder, StatusCode};
use std::time::Duration;
use url::Url;

use crate::operations;
use crate::{check_connectivity, App, AppClientError, CreateAppRequest, DEFAULT_PREFLIGHT_TIMEOUT};

/// The backend operations appctl needs.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Fails fast when the backend host cannot be resolved.
    async fn check_connectivity(&self) -> Result<(), AppClientError> {
        Ok(())
    }

    /// Fetches one app, failing with [`AppClientError::NotFound`] when it does not exist.
    async fn get_app_by_name(&self, name: &str, session: &Session) -> Result<App, AppClientError>;

    async fn list_apps(&self, session: &Session) -> Result<Vec<App>, AppClientError>;

    async fn create_app(
        &self,
        request: &CreateAppRequest,
        session: &Session,
    ) -> Result<(), AppClientError>;

    async fn delete_app(&self, name: &str, session: &Session) -> Result<(), AppClientError>;

    /// Tells the backend a user logged in, so it can provision their space.
    async fn register_login(&self, session: &Session) -> Result<(), AppClientError>;
}

/// Talks to the backend's `/v1/apps` API over HTTP.
#[derive(Debug, Clone)]
pub struct AppClient {
    client: reqwest::Client,
    base_url: Url,
    preflight_timeout: Duration,
}

/// What the backend answered, before status classification.
#[derive(Debug)]
pub(crate) struct Reply {
    pub(crate) status: StatusCode,
    pub(crate) body: String,
}

impl AppClient {
    /// `base_url` is the apps collection, e.g. `http://127.0.0.1:6112/v1/apps`.
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<AppClient, AppClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }
        Ok(AppClient {
            client,
            base_url,
            preflight_timeout: DEFAULT_PREFLIGHT_TIMEOUT,
        })
    }

    pub fn with_preflight_timeout(mut self, timeout: Duration) -> AppClient {
        self.preflight_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<segment>`, with the segment percent-encoded.
    pub(crate) fn url_for(&self, segment: &str) -> Url {
        let mut url = self.base_url.clone();
        // base URLs are checked in `new`, so they always have path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, url: Url, session: &Session) -> RequestBuilder {
        tracing::debug!(%method, %url, "backend request");
        self.client.request(method, url).bearer_auth(session.token())
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Reply, AppClientError> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                tracing::debug!("connection to the backend failed: {e}");
                AppClientError::BackendDown
            } else {
                AppClientError::SendRequest(e)
            }
        })?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, "backend response");
        Ok(Reply { status, body })
    }
}

impl Reply {
    /// Maps error statuses to errors, returning the body of a successful reply.
    pub(crate) fn check(self) -> Result<String, AppClientError> {
        match self.status.as_u16() {
            200..=299 => Ok(self.body),
            400 => Err(AppClientError::BadRequest(backend_message(&self.body))),
            403 => Err(AppClientError::Forbidden),
            429 => Err(AppClientError::RateLimited(backend_message(&self.body))),
            500..=599 => Err(AppClientError::ServerError),
            status => Err(AppClientError::UnexpectedStatus {
                status,
                body: backend_message(&self.body),
            }),
        }
    }
}

/// The human-readable part of an error body, which may or may not be JSON.
fn backend_message(body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) {
        for key in ["message", "Message", "error", "Error"] {
            if let Some(serde_json::Value::String(message)) = fields.get(key) {
                return message.trim().to_string();
            }
        }
    }
    body.trim().to_string()
}

#[async_trait]
impl BackendClient for AppClient {
    async fn check_connectivity(&self) -> Result<(), AppClientError> {
        check_connectivity(&self.base_url, self.preflight_timeout).await
    }

    async fn get_app_by_name(&self, name: &str, session: &Session) -> Result<App, AppClientError> {
        operations::get_app::run(self, name, session).await
    }

    async fn list_apps(&self, session: &Session) -> Result<Vec<App>, AppClientError> {
        operations::list_apps::run(self, session).await
    }

    async fn create_app(
        &self,
        request: &CreateAppRequest,
        session: &Session,
    ) -> Result<(), AppClientError> {
        operations::create_app::run(self, request, session).await
    }

    async fn delete_app(&self, name: &str, session: &Session) -> Result<(), AppClientError> {
        operations::delete_app::run(self, name, session).await
    }

    async fn register_login(&self, session: &Session) -> Result<(), AppClientError> {
        operations::login::run(self, session).await
    }
}
