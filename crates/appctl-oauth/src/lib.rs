//! OAuth 2.0 Device Authorization Grant (RFC 8628) for the appctl CLI.
//!
//! [`DeviceFlow`] drives the grant against any [`IdentityProvider`];
//! [`HttpIdentityProvider`] talks to an Auth0-style tenant.

pub mod device_flow;
pub mod error;
pub mod provider;
pub mod types;

pub use device_flow::{DeviceFlow, DEFAULT_POLL_INTERVAL, SLOW_DOWN_INCREMENT};
pub use error::OAuthError;
pub use provider::{HttpIdentityProvider, IdentityProvider, ProviderConfig};
pub use types::*;
