use appctl_client::BackendClient;
use clap::Parser;
use serde::Serialize;

use crate::command::{AppctlOutput, Context};
use crate::deploy::{validate_app_name, AppSummary};
use crate::telemetry::{outcome_event, DESCRIBE_APP};
use crate::AppctlResult;

#[derive(Debug, Serialize, Parser)]
pub struct Describe {
    /// Name of the app to describe
    #[arg(long, short = 'n')]
    name: String,
}

impl Describe {
    pub async fn run(&self, ctx: &Context<'_>) -> AppctlResult<AppctlOutput> {
        validate_app_name(&self.name)?;
        let backend = ctx.backend().await?;
        let (session, user) = ctx.session()?;

        let result = backend.get_app_by_name(&self.name, &session).await;
        let summary = result
            .as_ref()
            .ok()
            .map(|app| AppSummary::from_record(app.record(), ctx.clock.now()));
        ctx.telemetry.emit(outcome_event(
            DESCRIBE_APP,
            &result,
            user.as_ref(),
            summary.as_ref(),
        ));

        Ok(AppctlOutput::AppDescription(result?.raw().clone()))
    }
}
