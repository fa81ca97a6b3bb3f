#![deny(missing_docs)]

//! Defines the output format of the traces and events produced by appctl
//! and the libraries it drives. Everything is written to stderr so that
//! command output on stdout stays machine readable.

mod formatter;

use tracing_subscriber::filter::{LevelFilter, Targets};

pub use tracing_core::Level;

/// possible log levels
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// crates whose logs follow the requested level; everything else is capped at `warn`
const OWN_TARGETS: [&str; 7] = [
    "appctl",
    "appctl_client",
    "appctl_oauth",
    "appctl_std",
    "houston",
    "sputnik",
    "timber",
];

/// Initializes a global tracing subscriber that formats
/// all logs produced by appctl and its dependencies.
///
/// Nothing is printed unless a level is requested. Calling this more than
/// once keeps the first subscriber.
pub fn init(level: Option<Level>) {
    // by default, no logs are printed.
    let Some(level) = level else {
        return;
    };
    let filter = targets(level);
    // an error here means a subscriber is already installed
    let _ = match level {
        Level::DEBUG => formatter::verbose(filter),
        Level::TRACE => formatter::very_verbose(filter),
        _ => formatter::least_verbose(filter),
    };
}

fn targets(level: Level) -> Targets {
    let dependencies = LevelFilter::from_level(level).min(LevelFilter::WARN);
    OWN_TARGETS
        .iter()
        .fold(Targets::new().with_default(dependencies), |targets, target| {
            targets.with_target(*target, level)
        })
}
