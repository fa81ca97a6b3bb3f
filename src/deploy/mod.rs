//! Creating apps and deciding when they are ready.

mod error;
mod input;
mod orchestrator;
pub mod status;

pub use error::DeployError;
pub use input::{
    merge_env, parse_env_file, parse_env_flags, parse_port, validate_app_name, DeploySpec,
    InvalidAppName, RegistryCredentials,
};
pub use orchestrator::{DeployPolicy, Deployer, DeploymentOutcome, STILL_PENDING};
pub use status::{interpret, AppSummary, Interpretation, Readiness, INVALID_IMAGE_MARKER};
