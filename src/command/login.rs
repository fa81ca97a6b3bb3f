use appctl_std::{infoln, prompt};
use clap::Parser;
use serde::Serialize;

use crate::auth;
use crate::command::output::login_instructions;
use crate::command::{AppctlOutput, Context};
use crate::telemetry::User;
use crate::utils::browser;
use crate::utils::spinner::Spinner;
use crate::AppctlResult;

const WAITING: &str = "Waiting for the login to be confirmed...";

#[derive(Debug, Serialize, Parser)]
pub struct Login {
    /// Print the confirmation link instead of opening a browser
    #[arg(long)]
    no_browser: bool,
}

impl Login {
    pub async fn run(&self, ctx: &Context<'_>) -> AppctlResult<AppctlOutput> {
        let backend = ctx.backend().await?;
        let provider = ctx.client_config.identity_provider();
        let store = ctx.client_config.session_store();
        let open_browser = !self.no_browser && prompt::is_interactive();
        let spinner = Spinner::on_stderr();

        let login = auth::Login::new(&provider, &backend, &store, ctx.clock, ctx.telemetry)
            .run(ctx.cancel, |grant| {
                let uri = grant.browser_uri();
                let opened = open_browser
                    && browser::open(uri)
                        .inspect_err(|error| tracing::debug!(%error, "could not open a browser"))
                        .is_ok();
                if let Err(error) = login_instructions(&grant.user_code, uri, opened) {
                    tracing::debug!(%error, "could not print the login instructions");
                }
                if spinner.is_visible() {
                    spinner.start(WAITING);
                } else {
                    infoln!("{WAITING}");
                }
            })
            .await;
        drop(spinner);
        let session = login?;

        tracing::info!(path = %store.path(), "saved the login session");
        Ok(AppctlOutput::LoggedIn {
            user: User::from_session(&session).map(|user| user.id),
            expires_at: session.expires_at(),
        })
    }
}
