use std::io::{self, BufRead};

use anyhow::anyhow;
use appctl_client::{AppClientError, BackendClient};
use appctl_std::{infoln, prompt, Style};
use clap::Parser;
use houston::Session;
use serde::Serialize;

use crate::command::{AppctlOutput, Context};
use crate::deploy::{validate_app_name, AppSummary};
use crate::error::Suggestion;
use crate::telemetry::{outcome_event, DELETE_APP};
use crate::{AppctlError, AppctlResult};

const CONFIRM_ATTEMPTS: usize = 3;

#[derive(Debug, Serialize, Parser)]
pub struct Delete {
    /// Name of the app to delete
    #[arg(long, short = 'n')]
    name: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'f')]
    force: bool,
}

impl Delete {
    pub async fn run(&self, ctx: &Context<'_>) -> AppctlResult<AppctlOutput> {
        validate_app_name(&self.name)?;
        if !self.force && !self.confirm(&mut io::stdin().lock())? {
            infoln!("App {} was not deleted.", Style::AppName.paint(&self.name));
            return Ok(AppctlOutput::EmptySuccess);
        }

        let backend = ctx.backend().await?;
        let (session, user) = ctx.session()?;

        let mut summary = None;
        let result = self
            .delete(&backend, &session, ctx, &mut summary)
            .await;
        ctx.telemetry.emit(outcome_event(
            DELETE_APP,
            &result,
            user.as_ref(),
            summary.as_ref(),
        ));
        result?;

        Ok(AppctlOutput::AppDeleted {
            name: self.name.clone(),
        })
    }

    /// `Ok(false)` means the user said no.
    fn confirm<R: BufRead>(&self, input: &mut R) -> AppctlResult<bool> {
        let question = format!(
            "Are you sure you want to delete {}",
            Style::AppName.paint(&self.name)
        );
        match prompt::confirm_with_retries(&question, CONFIRM_ATTEMPTS, input)? {
            Some(answer) => Ok(answer),
            None => {
                let mut error = AppctlError::new(anyhow!(
                    "No confirmation was given, so '{}' was not deleted.",
                    self.name
                ));
                error.set_suggestion(Suggestion::Adhoc(format!(
                    "Answer y or n, or pass {} to skip the question.",
                    Style::Command.paint("`--force`")
                )));
                Err(error)
            }
        }
    }

    /// The summary is captured before deletion so the event can describe the app.
    async fn delete(
        &self,
        backend: &dyn BackendClient,
        session: &Session,
        ctx: &Context<'_>,
        summary: &mut Option<AppSummary>,
    ) -> Result<(), AppClientError> {
        let app = backend.get_app_by_name(&self.name, session).await?;
        *summary = Some(AppSummary::from_record(app.record(), ctx.clock.now()));
        backend.delete_app(&self.name, session).await
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use speculoos::prelude::*;

    use super::*;

    fn delete(name: &str) -> Delete {
        Delete {
            name: name.to_string(),
            force: false,
        }
    }

    #[test]
    fn yes_confirms_the_deletion() {
        let mut input = Cursor::new(b"y\n".to_vec());
        assert_that!(delete("hello").confirm(&mut input)).is_ok().is_true();
    }

    #[test]
    fn no_keeps_the_app() {
        let mut input = Cursor::new(b"nope\nn\n".to_vec());
        assert_that!(delete("hello").confirm(&mut input)).is_ok().is_false();
    }

    #[test]
    fn three_bad_answers_give_up() {
        let mut input = Cursor::new(b"a\nb\nc\n".to_vec());
        let error = delete("hello").confirm(&mut input).unwrap_err();
        assert!(error.message().contains("'hello' was not deleted"));
        assert!(matches!(error.suggestion(), Some(Suggestion::Adhoc(_))));
    }
}
