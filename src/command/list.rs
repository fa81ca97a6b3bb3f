use appctl_client::BackendClient;
use clap::Parser;
use serde::Serialize;

use crate::command::{AppctlOutput, Context};
use crate::deploy::AppSummary;
use crate::telemetry::{outcome_event, LIST_APPS};
use crate::AppctlResult;

#[derive(Debug, Serialize, Parser)]
pub struct List {}

impl List {
    pub async fn run(&self, ctx: &Context<'_>) -> AppctlResult<AppctlOutput> {
        let backend = ctx.backend().await?;
        let (session, user) = ctx.session()?;

        let now = ctx.clock.now();
        let result = backend.list_apps(&session).await.map(|apps| {
            apps.iter()
                .map(|app| AppSummary::from_record(app.record(), now))
                .collect::<Vec<_>>()
        });
        ctx.telemetry
            .emit(outcome_event(LIST_APPS, &result, user.as_ref(), None));

        let apps = result?;
        tracing::debug!(count = apps.len(), "listed apps");
        Ok(AppctlOutput::AppList(apps))
    }
}
