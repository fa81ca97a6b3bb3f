use std::time::Duration;

use appctl_std::{sleep_or_cancel, Clock};
use chrono::TimeDelta;
use houston::Session;
use tokio_util::sync::CancellationToken;

use crate::{DeviceGrant, ExchangeErrorCode, IdentityProvider, OAuthError};

/// poll interval used when the provider does not name one
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// added to the poll interval every time the provider answers `slow_down`
pub const SLOW_DOWN_INCREMENT: Duration = Duration::from_secs(5);

/// Drives the device authorization grant against an [`IdentityProvider`].
pub struct DeviceFlow<'a> {
    provider: &'a dyn IdentityProvider,
    clock: &'a dyn Clock,
}

impl<'a> DeviceFlow<'a> {
    pub fn new(provider: &'a dyn IdentityProvider, clock: &'a dyn Clock) -> Self {
        Self { provider, clock }
    }

    /// Asks the provider for a device code and the code the user must confirm.
    pub async fn request_device_grant(&self) -> Result<DeviceGrant, OAuthError> {
        let grant = self.provider.get_device_code().await.map_err(|e| match e {
            OAuthError::DeviceCodeUnavailable(_) => e,
            other => OAuthError::DeviceCodeUnavailable(other.to_string()),
        })?;
        tracing::debug!(
            user_code = %grant.user_code,
            expires_in = grant.expires_in,
            interval = ?grant.interval,
            "received device grant"
        );
        Ok(grant)
    }

    /// Polls the token endpoint until the user approves or rejects the grant.
    ///
    /// The first exchange happens immediately. Transport failures are logged
    /// and retried. Polling stops on its own once the grant's lifetime has
    /// passed, even if the provider never says `expired_token`.
    pub async fn await_token(
        &self,
        grant: &DeviceGrant,
        cancel: &CancellationToken,
    ) -> Result<Session, OAuthError> {
        let mut interval = grant.poll_interval();
        let deadline = TimeDelta::from_std(grant.lifetime())
            .ok()
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime));
        let mut attempt = 0_u32;

        loop {
            if cancel.is_cancelled() {
                return Err(OAuthError::Cancelled);
            }
            attempt += 1;

            match self.provider.exchange_token(&grant.device_code).await {
                Ok(result) => match result.error {
                    ExchangeErrorCode::None => {
                        return match result.id_token {
                            Some(id_token) => {
                                tracing::debug!(attempt, "device authorization approved");
                                Ok(Session::expiring_in(
                                    id_token,
                                    self.clock.now(),
                                    result.expires_in,
                                ))
                            }
                            None => Err(OAuthError::ExchangeError(
                                "the identity provider did not return an id token".to_string(),
                            )),
                        };
                    }
                    ExchangeErrorCode::AuthorizationPending => {
                        tracing::debug!(attempt, "authorization pending");
                    }
                    ExchangeErrorCode::SlowDown => {
                        interval += SLOW_DOWN_INCREMENT;
                        tracing::debug!(attempt, ?interval, "asked to slow down");
                    }
                    ExchangeErrorCode::ExpiredToken => return Err(OAuthError::Expired),
                    ExchangeErrorCode::AccessDenied => return Err(OAuthError::Denied),
                    ExchangeErrorCode::Other(code) => {
                        let reason = match result.error_description {
                            Some(description) => format!("{code}: {description}"),
                            None => code,
                        };
                        return Err(OAuthError::ExchangeError(reason));
                    }
                },
                Err(OAuthError::HttpError(e)) => {
                    tracing::warn!(attempt, "token exchange failed, retrying: {e}");
                }
                Err(e) => return Err(e),
            }

            if deadline.is_some_and(|deadline| self.clock.now() + interval_delta(interval) > deadline) {
                tracing::debug!(attempt, "device grant lifetime exhausted");
                return Err(OAuthError::Expired);
            }
            sleep_or_cancel(self.clock, interval, cancel).await?;
        }
    }
}

fn interval_delta(interval: Duration) -> TimeDelta {
    TimeDelta::from_std(interval).unwrap_or(TimeDelta::MAX)
}
