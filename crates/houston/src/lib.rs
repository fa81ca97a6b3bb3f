#![cfg_attr(not(test), deny(clippy::panic,))]
#![deny(missing_docs)]

//! Utilities for locating appctl's configuration home and persisting the
//! login session.

mod config;
mod error;
mod session;
mod store;

pub use config::Config;
pub use error::HoustonProblem;
pub use session::{mask_token, Audience, Session, TokenClaims};
pub use store::{FileSessionStore, SessionStore};
