use std::time::Duration;

use appctl_client::{AppClientError, BackendClient};
use appctl_std::{sleep_or_cancel, Clock};
use chrono::{DateTime, TimeDelta, Utc};
use houston::Session;
use serde::Serialize;
use sputnik::Telemetry;
use tokio_util::sync::CancellationToken;

use super::status::{interpret, AppSummary};
use super::{DeployError, DeploySpec};
use crate::auth::AuthRequired;
use crate::telemetry::{outcome_event, User, DEPLOY_APP};

/// Reported when polling gave up before the app became ready.
pub const STILL_PENDING: &str = "taking longer than expected";

/// How long `appctl deploy` waits for an app, and how often it looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPolicy {
    /// Wait before the first status fetch.
    pub initial_delay: Duration,
    /// Wait between status fetches.
    pub poll_interval: Duration,
    /// Most status fetches made for one deployment.
    pub max_polls: u32,
    /// Polling stops once this much time has passed since the app was created,
    /// whatever `max_polls` says.
    pub total_timeout: Duration,
    /// Wait between fetches once the app is ready but not yet served over https.
    pub secure_url_interval: Duration,
}

impl Default for DeployPolicy {
    fn default() -> Self {
        DeployPolicy {
            initial_delay: Duration::from_secs(5),
            poll_interval: Duration::from_secs(5),
            max_polls: 5,
            total_timeout: Duration::from_secs(25),
            secure_url_interval: Duration::from_secs(2),
        }
    }
}

/// What a finished `deploy` observed.
///
/// `ready: false` is not a failure: the app was created and may still come up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentOutcome {
    pub name: String,
    pub url: Option<String>,
    pub ready: bool,
    pub failure_reason: Option<String>,
}

impl DeploymentOutcome {
    fn ready(name: &str, url: String) -> Self {
        DeploymentOutcome {
            name: name.to_string(),
            url: Some(url),
            ready: true,
            failure_reason: None,
        }
    }

    fn pending(name: &str) -> Self {
        DeploymentOutcome {
            name: name.to_string(),
            url: None,
            ready: false,
            failure_reason: Some(STILL_PENDING.to_string()),
        }
    }
}

/// Creates apps and waits for them to come up.
pub struct Deployer<'a> {
    backend: &'a dyn BackendClient,
    clock: &'a dyn Clock,
    telemetry: &'a dyn Telemetry,
    policy: DeployPolicy,
}

impl<'a> Deployer<'a> {
    pub fn new(
        backend: &'a dyn BackendClient,
        clock: &'a dyn Clock,
        telemetry: &'a dyn Telemetry,
    ) -> Self {
        Deployer {
            backend,
            clock,
            telemetry,
            policy: DeployPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DeployPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates `spec`, creates the app and polls until it is ready, its
    /// image turns out to be unusable, or the polling budget runs out.
    ///
    /// `session` is only looked at once `spec` is known to be usable, and it is
    /// checked for expiry before every backend call.
    ///
    /// Exactly one `Deploy-App` event is emitted per call.
    pub async fn deploy(
        &self,
        spec: &DeploySpec,
        session: Result<&Session, AuthRequired>,
        user: Option<&User>,
        cancel: &CancellationToken,
    ) -> Result<DeploymentOutcome, DeployError> {
        let mut last_seen = None;
        let result = self.create_and_wait(spec, session, cancel, &mut last_seen).await;

        let event = match &result {
            Ok(outcome) if !outcome.ready => {
                let pending: Result<(), &str> = Err(STILL_PENDING);
                outcome_event(DEPLOY_APP, &pending, user, last_seen.as_ref())
            }
            _ => outcome_event(DEPLOY_APP, &result, user, last_seen.as_ref()),
        };
        self.telemetry.emit(event);

        result
    }

    async fn create_and_wait(
        &self,
        spec: &DeploySpec,
        session: Result<&Session, AuthRequired>,
        cancel: &CancellationToken,
        last_seen: &mut Option<AppSummary>,
    ) -> Result<DeploymentOutcome, DeployError> {
        spec.check()?;
        let session = session?;
        self.ensure_fresh(session)?;

        match self.backend.get_app_by_name(&spec.name, session).await {
            Ok(_) => {
                return Err(DeployError::AlreadyExists {
                    name: spec.name.clone(),
                });
            }
            Err(AppClientError::NotFound { .. }) => {}
            Err(source) => return Err(self.backend_error(spec, source)),
        }

        if cancel.is_cancelled() {
            return Err(DeployError::Cancelled);
        }
        self.ensure_fresh(session)?;
        tracing::info!(name = %spec.name, image = %spec.image, "creating app");
        match self.backend.create_app(&spec.to_request(), session).await {
            Ok(()) => {}
            Err(AppClientError::RateLimited(message)) => {
                return Err(DeployError::RateLimited(message));
            }
            Err(source) => return Err(self.backend_error(spec, source)),
        }
        let deadline = self.deadline();

        sleep_or_cancel(self.clock, self.policy.initial_delay, cancel).await?;

        for attempt in 1..=self.policy.max_polls {
            if cancel.is_cancelled() {
                return Err(DeployError::Cancelled);
            }
            if self.clock.now() > deadline {
                tracing::debug!(attempt, "deployment wait budget spent");
                break;
            }
            self.ensure_fresh(session)?;

            let pause = match self.backend.get_app_by_name(&spec.name, session).await {
                Ok(app) => {
                    let record = app.record();
                    *last_seen = Some(AppSummary::from_record(record, self.clock.now()));
                    let status = interpret(record);

                    if status.is_invalid_image() {
                        return Err(DeployError::InvalidImage {
                            name: spec.name.clone(),
                            image: spec.image.clone(),
                        });
                    }

                    let ready = status.is_ready();
                    match status.url.as_deref() {
                        Some(url) if ready && is_secure(url) => {
                            tracing::debug!(attempt, url, "app is ready");
                            return Ok(DeploymentOutcome::ready(&spec.name, url.to_string()));
                        }
                        Some(url) if ready => {
                            tracing::debug!(attempt, url, "app is ready, waiting for a secure url");
                            self.policy.secure_url_interval
                        }
                        _ => {
                            tracing::debug!(attempt, reason = status.reason(), "app is not ready yet");
                            self.policy.poll_interval
                        }
                    }
                }
                Err(error) => {
                    tracing::debug!(attempt, %error, "could not fetch the app yet");
                    self.policy.poll_interval
                }
            };

            if attempt < self.policy.max_polls {
                sleep_or_cancel(self.clock, pause, cancel).await?;
            }
        }

        Ok(DeploymentOutcome::pending(&spec.name))
    }

    fn ensure_fresh(&self, session: &Session) -> Result<(), DeployError> {
        if session.is_expired_at(self.clock.now()) {
            return Err(AuthRequired::Expired.into());
        }
        Ok(())
    }

    fn deadline(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        TimeDelta::from_std(self.policy.total_timeout)
            .ok()
            .and_then(|budget| now.checked_add_signed(budget))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn backend_error(&self, spec: &DeploySpec, source: AppClientError) -> DeployError {
        DeployError::Backend {
            name: spec.name.clone(),
            source,
        }
    }
}

fn is_secure(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|url| url.scheme() == "https")
}
