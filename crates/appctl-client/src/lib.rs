//! HTTP client for the app-management backend used by the appctl CLI.
//!
//! The [`BackendClient`] trait is what the rest of appctl programs against;
//! [`AppClient`] implements it over reqwest. Every response body is kept as
//! raw JSON alongside a lenient typed view, [`AppRecord`], that never fails
//! to build no matter how much of the document is missing.

mod client;
mod error;
mod preflight;

/// Requests to the backend, one module per endpoint.
pub mod operations;

/// Types shared across operations.
pub mod shared;

pub use client::{AppClient, BackendClient};
pub use error::AppClientError;
pub use preflight::{check_connectivity, DEFAULT_PREFLIGHT_TIMEOUT};
pub use shared::{App, AppRecord, Condition, CreateAppRequest, EnvVar};
