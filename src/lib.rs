pub mod auth;
pub mod cli;
pub mod command;
pub mod deploy;
mod error;
pub mod telemetry;
pub mod utils;

pub use command::{AppctlOutput, FormatType};
pub use error::{AppctlError, AppctlResult, Code, Suggestion};

pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
