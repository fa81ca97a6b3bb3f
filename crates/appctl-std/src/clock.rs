use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Source of the current time and of the pauses between polls.
///
/// Every polling loop in appctl takes a `Clock` instead of calling
/// `tokio::time::sleep` directly so that tests can run the loops against
/// virtual time.
#[async_trait]
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Suspends the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// The real clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// Returned by [`sleep_or_cancel`] when the user asked to stop.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("the operation was cancelled")]
pub struct Cancelled;

/// Sleeps for `duration` unless `cancel` fires first.
///
/// The token is checked before the sleep starts, so an already-cancelled
/// token never suspends.
pub async fn sleep_or_cancel(
    clock: &dyn Clock,
    duration: Duration,
    cancel: &CancellationToken,
) -> Result<(), Cancelled> {
    if cancel.is_cancelled() {
        return Err(Cancelled);
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Cancelled),
        _ = clock.sleep(duration) => Ok(()),
    }
}
