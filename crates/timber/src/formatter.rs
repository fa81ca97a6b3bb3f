use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

use std::io;

pub(crate) fn least_verbose(filter: Targets) -> Result<(), TryInitError> {
    let layer = fmt::layer()
        .without_time()
        .with_target(false)
        .compact()
        .with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
}

pub(crate) fn verbose(filter: Targets) -> Result<(), TryInitError> {
    let layer = fmt::layer().without_time().pretty().with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
}

pub(crate) fn very_verbose(filter: Targets) -> Result<(), TryInitError> {
    let layer = fmt::layer()
        .with_thread_ids(true)
        .with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
}
