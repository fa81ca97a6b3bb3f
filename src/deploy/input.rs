use std::fmt;

use appctl_client::{CreateAppRequest, EnvVar};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::DeployError;

lazy_static! {
    static ref APP_NAME: Regex =
        Regex::new(r"^[a-z0-9][a-z0-9.-]*$").expect("the app name pattern is a valid regex");
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Invalid app name '{name}'. App names must contain only lowercase alphanumeric characters, '-' or '.', and must start with an alphanumeric character."
)]
pub struct InvalidAppName {
    pub name: String,
}

/// Checks a name against the backend's naming rules: lowercase alphanumerics,
/// `-` and `.`, starting with an alphanumeric.
pub fn validate_app_name(name: &str) -> Result<(), InvalidAppName> {
    if APP_NAME.is_match(name) {
        Ok(())
    } else {
        Err(InvalidAppName {
            name: name.to_string(),
        })
    }
}

/// Login for a private container registry.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl RegistryCredentials {
    /// Both or neither must be given. Empty strings count as not given.
    pub fn from_parts(
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Option<RegistryCredentials>, DeployError> {
        let username = username.filter(|username| !username.is_empty());
        let password = password.filter(|password| !password.is_empty());
        match (username, password) {
            (Some(username), Some(password)) => Ok(Some(RegistryCredentials { username, password })),
            (None, None) => Ok(None),
            _ => Err(DeployError::InvalidInput(
                "Incorrect options specified. Either both or none of the username and password should be specified.".to_string(),
            )),
        }
    }
}

/// Everything needed to create one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploySpec {
    pub name: String,
    pub image: String,
    pub env: Vec<EnvVar>,
    pub port: Option<u16>,
    pub credentials: Option<RegistryCredentials>,
}

impl DeploySpec {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> DeploySpec {
        DeploySpec {
            name: name.into(),
            image: image.into(),
            env: Vec::new(),
            port: None,
            credentials: None,
        }
    }

    /// Checks the fields every deployment needs, in the order they are reported.
    pub fn check(&self) -> Result<(), DeployError> {
        if self.name.is_empty() {
            return Err(DeployError::MissingField { field: "name" });
        }
        if self.image.is_empty() {
            return Err(DeployError::MissingField { field: "image" });
        }
        validate_app_name(&self.name)?;
        Ok(())
    }

    pub fn with_env(mut self, env: Vec<EnvVar>) -> DeploySpec {
        self.env = env;
        self
    }

    pub fn with_port(mut self, port: Option<u16>) -> DeploySpec {
        self.port = port;
        self
    }

    pub fn with_credentials(mut self, credentials: Option<RegistryCredentials>) -> DeploySpec {
        self.credentials = credentials;
        self
    }

    pub(crate) fn to_request(&self) -> CreateAppRequest {
        let mut request = CreateAppRequest::new(&self.name, &self.image);
        if let Some(credentials) = &self.credentials {
            request.username = Some(credentials.username.clone());
            request.password = Some(credentials.password.clone());
        }
        request.port = self.port.map(|port| port.to_string());
        request.envs = self.env.clone();
        request
    }
}

/// Parses a port typed by the user. Blank means the backend default.
pub fn parse_port(port: Option<&str>) -> Result<Option<u16>, DeployError> {
    match port.map(str::trim) {
        None | Some("") => Ok(None),
        Some(port) => port
            .parse::<u16>()
            .ok()
            .filter(|port| *port != 0)
            .map(Some)
            .ok_or_else(|| {
                DeployError::InvalidInput(format!(
                    "Invalid port '{port}'. Please enter a valid port."
                ))
            }),
    }
}

fn parse_pair(pair: &str, origin: &str) -> Result<EnvVar, DeployError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok(EnvVar::new(key.trim(), value)),
        _ => Err(DeployError::InvalidInput(format!(
            "Invalid environment variable '{pair}' in {origin}. Expected KEY=VALUE."
        ))),
    }
}

/// Adds `var`, replacing an earlier value for the same key.
fn upsert(vars: &mut Vec<EnvVar>, var: EnvVar) {
    match vars.iter_mut().find(|existing| existing.key == var.key) {
        Some(existing) => existing.value = var.value,
        None => vars.push(var),
    }
}

/// Parses repeated `--env KEY=VALUE` flags. A later flag overrides an earlier one.
pub fn parse_env_flags(pairs: &[String]) -> Result<Vec<EnvVar>, DeployError> {
    let mut vars = Vec::new();
    for pair in pairs {
        upsert(&mut vars, parse_pair(pair, "--env")?);
    }
    Ok(vars)
}

/// Parses an env file in dotenv syntax: quoting, `export` prefixes, comments and
/// `${VAR}` substitution all behave as they do for `.env` files.
pub fn parse_env_file(contents: &str, path: &str) -> Result<Vec<EnvVar>, DeployError> {
    let mut vars = Vec::new();
    for item in dotenvy::from_read_iter(contents.as_bytes()) {
        let (key, value) = item.map_err(|e| {
            DeployError::InvalidInput(format!("Could not read the env file {path}: {e}"))
        })?;
        upsert(&mut vars, EnvVar::new(key, value));
    }
    Ok(vars)
}

/// Combines flag and file variables. A key set in both places is rejected.
pub fn merge_env(flags: Vec<EnvVar>, file: Vec<EnvVar>) -> Result<Vec<EnvVar>, DeployError> {
    if let Some(duplicate) = file
        .iter()
        .find(|var| flags.iter().any(|flag| flag.key == var.key))
    {
        return Err(DeployError::InvalidInput(format!(
            "Environment variable '{}' is set both with --env and in the env file.",
            duplicate.key
        )));
    }
    let mut merged = flags;
    merged.extend(file);
    Ok(merged)
}
