mod delete;
mod deploy;
mod describe;
mod explain;
mod list;
mod login;
pub mod output;
mod version;

pub use delete::Delete;
pub use deploy::Deploy;
pub use describe::Describe;
pub use explain::Explain;
pub use list::List;
pub use login::Login;
pub use output::{AppctlOutput, FormatType, JsonOutput};
pub use version::Version;

use appctl_client::{AppClient, BackendClient};
use appctl_std::Clock;
use houston::Session;
use sputnik::Telemetry;
use tokio_util::sync::CancellationToken;

use crate::auth::{require_session, AuthRequired};
use crate::telemetry::User;
use crate::utils::client::ClientConfig;
use crate::AppctlResult;

/// What every backend command runs with.
pub struct Context<'a> {
    pub client_config: &'a ClientConfig,
    pub clock: &'a dyn Clock,
    pub telemetry: &'a dyn Telemetry,
    pub cancel: &'a CancellationToken,
}

impl Context<'_> {
    /// The stored login, if it is still good for this client.
    pub(crate) fn session(&self) -> AppctlResult<(Session, Option<User>)> {
        Ok(self.login()?)
    }

    /// Like [`Context::session`], for commands that decide themselves when a missing login matters.
    pub(crate) fn login(&self) -> Result<(Session, Option<User>), AuthRequired> {
        let store = self.client_config.session_store();
        require_session(
            &store,
            &self.client_config.settings().client_id,
            self.clock.now(),
        )
    }

    /// The backend client, once its host is known to resolve.
    pub(crate) async fn backend(&self) -> AppctlResult<AppClient> {
        let backend = self.client_config.backend()?;
        backend.check_connectivity().await?;
        Ok(backend)
    }
}
