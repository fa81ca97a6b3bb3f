use appctl_std::{infoln, prompt, Fs, Style};
use camino::Utf8PathBuf;
use clap::Parser;
use dialoguer::Input;
use serde::Serialize;

use crate::command::{AppctlOutput, Context};
use crate::deploy::{
    merge_env, parse_env_file, parse_env_flags, parse_port, DeploySpec, Deployer,
    RegistryCredentials,
};
use crate::AppctlResult;

#[derive(Debug, Serialize, Parser)]
pub struct Deploy {
    /// Name of the app. Lowercase letters, digits, '.' and '-'
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Container image to run, e.g. gcr.io/knative-samples/helloworld-go
    #[arg(long, short = 'i')]
    image: Option<String>,

    /// Username for a private container registry
    #[arg(long, short = 'u')]
    username: Option<String>,

    /// Password for a private container registry
    #[arg(long, short = 'P')]
    #[serde(skip_serializing)]
    password: Option<String>,

    /// Environment variable for the app as KEY=VALUE. Can be repeated
    #[arg(long = "env", short = 'e', value_name = "KEY=VALUE")]
    env: Vec<String>,

    /// File of KEY=VALUE lines to add to the app's environment
    #[arg(long = "env-file", value_name = "PATH")]
    env_file: Option<Utf8PathBuf>,

    /// Port the app listens on
    #[arg(long, short = 'p')]
    port: Option<String>,
}

impl Deploy {
    pub async fn run(&self, ctx: &Context<'_>) -> AppctlResult<AppctlOutput> {
        let backend = ctx.backend().await?;
        let (session, user) = match ctx.login() {
            Ok((session, user)) => (Ok(session), user),
            Err(missing) => (Err(missing), None),
        };
        // nobody logged out is asked for values that can't be used yet
        let spec = self.spec(prompt::is_interactive() && session.is_ok())?;

        if session.is_ok() && spec.check().is_ok() {
            infoln!(
                "Deploying {} from {}",
                Style::AppName.paint(&spec.name),
                Style::Link.paint(&spec.image)
            );
        }
        let outcome = Deployer::new(&backend, ctx.clock, ctx.telemetry)
            .deploy(&spec, session.as_ref().map_err(Clone::clone), user.as_ref(), ctx.cancel)
            .await?;
        Ok(AppctlOutput::Deployment(outcome))
    }

    /// Collects the flags into a spec, asking for anything missing when someone can answer.
    fn spec(&self, interactive: bool) -> AppctlResult<DeploySpec> {
        let name = self.value_or_prompt(&self.name, "App name", interactive)?;
        let image = self.value_or_prompt(&self.image, "Container image", interactive)?;
        let port = match &self.port {
            Some(port) => Some(port.clone()),
            None if interactive => Some(ask("Port (leave blank for the default)")?),
            None => None,
        };

        let credentials =
            RegistryCredentials::from_parts(self.username.clone(), self.password.clone())?;
        let flags = parse_env_flags(&self.env)?;
        let file = match &self.env_file {
            Some(path) => parse_env_file(&Fs::read_file(path)?, path.as_str())?,
            None => Vec::new(),
        };

        Ok(DeploySpec::new(name, image)
            .with_port(parse_port(port.as_deref())?)
            .with_env(merge_env(flags, file)?)
            .with_credentials(credentials))
    }

    fn value_or_prompt(
        &self,
        value: &Option<String>,
        question: &str,
        interactive: bool,
    ) -> AppctlResult<String> {
        match value {
            Some(value) => Ok(value.clone()),
            None if interactive => ask(question),
            // left blank, the deployer reports the missing field
            None => Ok(String::new()),
        }
    }
}

fn ask(question: &str) -> AppctlResult<String> {
    let answer = Input::<String>::new()
        .with_prompt(question)
        .allow_empty(true)
        .interact_text()?;
    Ok(answer.trim().to_string())
}

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(args: &[&str]) -> Deploy {
        Deploy::parse_from(std::iter::once("deploy").chain(args.iter().copied()))
    }

    #[test]
    fn flags_become_a_spec() {
        let deploy = parse(&[
            "-n",
            "hello",
            "-i",
            "gcr.io/demo/helloworld",
            "-p",
            "8080",
            "-e",
            "GREETING=hi",
        ]);
        let spec = deploy.spec(false).unwrap();
        assert_eq!(spec.name, "hello");
        assert_eq!(spec.image, "gcr.io/demo/helloworld");
        assert_eq!(spec.port, Some(8080));
        assert_eq!(spec.env.len(), 1);
        assert_eq!(spec.credentials, None);
    }

    #[test]
    fn missing_values_are_left_blank_without_a_terminal() {
        let spec = parse(&[]).spec(false).unwrap();
        assert_eq!(spec.name, "");
        assert_eq!(spec.image, "");
        assert_eq!(spec.port, None);
    }

    #[test]
    fn env_files_are_merged_with_flags() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("app.env");
        file.write_str("# comment\nMODE=prod\n\nLEVEL=3\n").unwrap();

        let deploy = parse(&[
            "-n",
            "hello",
            "-i",
            "img",
            "-e",
            "GREETING=hi",
            "--env-file",
            file.path().to_str().unwrap(),
        ]);
        let spec = deploy.spec(false).unwrap();
        let keys: Vec<_> = spec.env.iter().map(|var| var.key.as_str()).collect();
        assert_eq!(keys, vec!["GREETING", "MODE", "LEVEL"]);
    }

    #[test]
    fn a_key_in_both_places_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("app.env");
        file.write_str("MODE=prod\n").unwrap();

        let deploy = parse(&[
            "-n",
            "hello",
            "-i",
            "img",
            "-e",
            "MODE=dev",
            "--env-file",
            file.path().to_str().unwrap(),
        ]);
        assert!(deploy.spec(false).is_err());
    }

    #[test]
    fn half_a_registry_login_is_rejected() {
        let deploy = parse(&["-n", "hello", "-i", "img", "-u", "me"]);
        let error = deploy.spec(false).unwrap_err();
        assert_eq!(error.code(), Some(crate::error::Code::E003));
    }

    #[test]
    fn bad_ports_are_rejected() {
        let deploy = parse(&["-n", "hello", "-i", "img", "-p", "http"]);
        assert!(deploy.spec(false).is_err());
    }
}
