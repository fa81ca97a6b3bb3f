use appctl_std::SystemClock;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use serde::Serialize;
use sputnik::{NoTelemetry, Reporter, Telemetry};
use timber::Level;
use tokio_util::sync::CancellationToken;

use crate::command::{self, AppctlOutput, Context, FormatType};
use crate::telemetry::AppctlReport;
use crate::utils::{
    client::{ClientConfig, Settings},
    env::{AppctlEnv, AppctlEnvKey},
};
use crate::AppctlResult;

use houston as config;

#[derive(Debug, Parser)]
#[command(
    name = "appctl",
    author,
    version,
    about = "
appctl - deploy container images as serverless apps

To get started, log in with:

    $ appctl login

Then deploy an image and get back its URL:

    $ appctl deploy -n hello -i gcr.io/knative-samples/helloworld-go

The other commands manage what you have deployed:

    - appctl list: List your apps and whether they are ready
    - appctl describe -n <name>: Show everything the backend knows about an app
    - appctl delete -n <name>: Remove an app
"
)]
pub struct Appctl {
    #[command(subcommand)]
    pub command: Command,

    /// Specify appctl's log level
    #[arg(long = "log", short = 'l', global = true, value_parser = parse_level)]
    pub log_level: Option<Level>,

    /// Specify appctl's output type
    #[arg(long = "format", global = true, value_enum, default_value_t = FormatType::Plain)]
    pub format_type: FormatType,

    #[arg(skip)]
    pub env_store: AppctlEnv,
}

fn parse_level(level: &str) -> Result<Level, String> {
    level.parse().map_err(|_| {
        format!(
            "'{level}' is not a log level, expected one of {}",
            timber::LEVELS.join(", ")
        )
    })
}

#[derive(Debug, Serialize, Subcommand)]
pub enum Command {
    /// Log in to the apps backend from your browser
    Login(command::Login),

    /// Deploy a container image as an app
    Deploy(command::Deploy),

    /// List your apps
    List(command::List),

    /// Describe one app
    Describe(command::Describe),

    /// Delete an app
    Delete(command::Delete),

    /// Print appctl's version
    Version(command::Version),

    /// Explain error codes
    Explain(command::Explain),
}

impl Appctl {
    pub(crate) fn get_appctl_config(&self) -> AppctlResult<config::Config> {
        let override_home: Option<Utf8PathBuf> = self
            .env_store
            .get_non_empty(AppctlEnvKey::ConfigHome)?
            .map(Utf8PathBuf::from);
        Ok(config::Config::new(override_home.as_ref())?)
    }

    pub(crate) fn get_client_config(&self) -> AppctlResult<ClientConfig> {
        let settings = Settings::from_env(&self.env_store)?;
        settings.ensure_present()?;
        ClientConfig::new(settings, self.get_appctl_config()?)
    }

    /// Runs the chosen command. Telemetry queued along the way is sent before returning.
    pub async fn run(&self, cancel: &CancellationToken) -> AppctlResult<AppctlOutput> {
        match &self.command {
            Command::Version(command) => return command.run(),
            Command::Explain(command) => return command.run(),
            _ => {}
        }

        let client_config = self.get_client_config()?;
        let report = AppctlReport::new(
            self.env_store.clone(),
            client_config.config().machine_id_path(),
            client_config.http().clone(),
        );
        let reporter = Reporter::new(&report)
            .inspect_err(|telemetry_error| tracing::debug!(%telemetry_error, "telemetry is off"))
            .ok();
        let telemetry: &dyn Telemetry = match &reporter {
            Some(reporter) => reporter,
            None => &NoTelemetry,
        };

        let ctx = Context {
            client_config: &client_config,
            clock: &SystemClock,
            telemetry,
            cancel,
        };
        let result = match &self.command {
            Command::Login(command) => command.run(&ctx).await,
            Command::Deploy(command) => command.run(&ctx).await,
            Command::List(command) => command.run(&ctx).await,
            Command::Describe(command) => command.run(&ctx).await,
            Command::Delete(command) => command.run(&ctx).await,
            Command::Version(command) => command.run(),
            Command::Explain(command) => command.run(),
        };

        if let Some(reporter) = &reporter {
            // log + ignore errors because it is not in the critical path
            if let Err(telemetry_error) = reporter.flush().await {
                tracing::debug!(%telemetry_error, "could not report usage");
            }
        }
        result
    }
}
