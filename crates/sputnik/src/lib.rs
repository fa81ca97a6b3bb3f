#![deny(missing_docs)]

//! Utilities for reporting anonymous usage events for the appctl CLI tool.
//!
//! Events are recorded synchronously through the [`Telemetry`] trait and
//! delivered in one batch by [`Reporter::flush`] before the process exits.
//! Delivery is best-effort: failures are logged and never reach the user.

mod error;
mod event;
mod report;
mod reporter;

pub use error::SputnikError;
pub use event::{Event, EventStatus};
pub use report::Report;
pub use reporter::{Reporter, REPORT_TIMEOUT};

/// Something that accepts usage events.
///
/// Implementations must never block the caller or fail; anything that goes
/// wrong is their own business.
pub trait Telemetry: Send + Sync {
    /// Records a single event.
    fn emit(&self, event: Event);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTelemetry;

impl Telemetry for NoTelemetry {
    fn emit(&self, event: Event) {
        tracing::trace!(event = %event.name(), "telemetry disabled, dropping event");
    }
}
