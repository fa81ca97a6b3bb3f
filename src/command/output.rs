use std::fmt::Write;
use std::io;

use appctl_std::{infoln, successln, warnln, Style};
use calm_io::{stderrln, stdoutln};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use comfy_table::Cell;
use serde::Serialize;
use serde_json::{json, Value};
use termimad::MadSkin;

use crate::deploy::{AppSummary, DeploymentOutcome};
use crate::error::AppctlError;
use crate::utils::table;

/// How command results and errors are written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    #[default]
    Plain,
    Json,
}

/// AppctlOutput defines all of the different types of data that are printed
/// to `stdout`. Every one of appctl's commands should return `AppctlResult<AppctlOutput>`
/// If the command needs to output some type of data, it should be structured
/// in this enum, and its print logic should be handled in `AppctlOutput::get_stdout`
///
/// Not all commands will output machine readable information, and those should
/// return `Ok(AppctlOutput::EmptySuccess)`. If a new command is added and it needs to
/// return something that is not described well in this enum, it should be added.
#[derive(Clone, PartialEq, Debug)]
pub enum AppctlOutput {
    LoggedIn {
        user: Option<String>,
        expires_at: DateTime<Utc>,
    },
    Deployment(DeploymentOutcome),
    AppList(Vec<AppSummary>),
    AppDescription(Value),
    AppDeleted {
        name: String,
    },
    Version(String),
    ErrorExplanation(String),
    EmptySuccess,
}

impl AppctlOutput {
    /// What goes to stdout in plain mode. Progress and hints go to stderr here too.
    pub fn get_stdout(&self) -> io::Result<Option<String>> {
        Ok(match self {
            AppctlOutput::LoggedIn { user, .. } => {
                match user {
                    Some(user) => successln!("Logged in as {}.", Style::AppName.paint(user)),
                    None => successln!("Successfully logged in."),
                }
                None
            }
            AppctlOutput::Deployment(outcome) => {
                if outcome.ready {
                    successln!("App {} deployed.", Style::AppName.paint(&outcome.name));
                    outcome.url.clone()
                } else {
                    warnln!(
                        "App {} was created but is {}. Check on it with {}.",
                        Style::AppName.paint(&outcome.name),
                        outcome
                            .failure_reason
                            .as_deref()
                            .unwrap_or(crate::deploy::STILL_PENDING),
                        Style::Command.paint(format!("`appctl describe -n {}`", outcome.name))
                    );
                    None
                }
            }
            AppctlOutput::AppList(apps) => {
                if apps.is_empty() {
                    infoln!("No apps found.");
                    None
                } else {
                    let mut table = table::get_table();
                    table.set_header(vec!["NAME", "URL", "IMAGE", "READY", "AGE"]);
                    for app in apps {
                        table.add_row(vec![
                            Cell::new(&app.name),
                            Cell::new(&app.url),
                            Cell::new(&app.image),
                            Cell::new(&app.ready),
                            Cell::new(&app.age),
                        ]);
                    }
                    Some(table.to_string())
                }
            }
            AppctlOutput::AppDescription(app) => {
                Some(serde_json::to_string_pretty(app).map_err(io::Error::other)?)
            }
            AppctlOutput::AppDeleted { name } => {
                successln!("App {} deleted.", Style::AppName.paint(name));
                None
            }
            AppctlOutput::Version(version) => Some(version.clone()),
            AppctlOutput::ErrorExplanation(explanation) => {
                // underline bolded md
                let mut skin = MadSkin::default();
                skin.bold.add_attr(termimad::crossterm::style::Attribute::Underlined);
                Some(format!("{}", skin.term_text(explanation)))
            }
            AppctlOutput::EmptySuccess => None,
        })
    }

    pub(crate) fn get_internal_data_json(&self) -> Value {
        match self {
            AppctlOutput::LoggedIn { user, expires_at } => {
                json!({ "user": user, "expires_at": expires_at.to_rfc3339() })
            }
            AppctlOutput::Deployment(outcome) => json!(outcome),
            AppctlOutput::AppList(apps) => json!({ "apps": apps }),
            AppctlOutput::AppDescription(app) => json!({ "app": app }),
            AppctlOutput::AppDeleted { name } => json!({ "name": name }),
            AppctlOutput::Version(version) => json!({ "version": version }),
            AppctlOutput::ErrorExplanation(explanation) => json!({ "explanation": explanation }),
            AppctlOutput::EmptySuccess => json!(null),
        }
    }

    pub(crate) fn get_json(&self) -> Value {
        json!(JsonOutput::from(self.clone()))
    }

    pub fn print(&self, format_type: FormatType) -> io::Result<()> {
        match format_type {
            FormatType::Plain => {
                if let Some(stdout) = self.get_stdout()? {
                    stdoutln!("{}", stdout.trim_end())?;
                }
            }
            FormatType::Json => {
                stdoutln!("{}", self.get_json())?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonOutput {
    json_version: JsonVersion,
    data: Value,
    error: Value,
}

impl JsonOutput {
    pub fn print(&self) -> io::Result<()> {
        stdoutln!("{}", json!(self))
    }
}

impl From<AppctlError> for JsonOutput {
    fn from(error: AppctlError) -> Self {
        JsonOutput {
            json_version: JsonVersion::default(),
            data: json!({ "success": false }),
            error: error.get_internal_error_json(),
        }
    }
}

impl From<AppctlOutput> for JsonOutput {
    fn from(output: AppctlOutput) -> Self {
        let mut data = output.get_internal_data_json();
        match data.as_object_mut() {
            Some(object) => {
                object.insert("success".to_string(), json!(true));
            }
            None => data = json!({ "success": true }),
        }
        JsonOutput {
            json_version: JsonVersion::default(),
            data,
            error: Value::Null,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub enum JsonVersion {
    #[default]
    #[serde(rename = "1")]
    One,
}

/// Writes an error the way `format_type` asks for.
pub fn print_error(error: AppctlError, format_type: FormatType) -> io::Result<()> {
    match format_type {
        FormatType::Plain => error.print(),
        FormatType::Json => JsonOutput::from(error).print(),
    }
}

/// Shown while waiting for the user to approve a login.
pub fn login_instructions(user_code: &str, uri: &str, opened: bool) -> io::Result<()> {
    let mut message = String::new();
    let _ = writeln!(
        message,
        "Your confirmation code is {}",
        Style::UserCode.paint(user_code)
    );
    if opened {
        let _ = write!(
            message,
            "A browser window was opened. If it did not appear, visit {}",
            Style::Link.paint(uri)
        );
    } else {
        let _ = write!(
            message,
            "Open {} in a browser to confirm the login",
            Style::Link.paint(uri)
        );
    }
    stderrln!("{}", message)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::deploy::DeployError;

    #[test]
    fn list_json_carries_every_app() {
        let output = AppctlOutput::AppList(vec![AppSummary {
            name: "hello".to_string(),
            url: "https://hello.example.com".to_string(),
            image: "gcr.io/demo/helloworld".to_string(),
            port: Some(8080),
            ready: "True".to_string(),
            creation_timestamp: "2024-01-01T00:00:00Z".to_string(),
            age: "2h".to_string(),
        }]);
        let expected = json!({
            "json_version": "1",
            "data": {
                "apps": [{
                    "name": "hello",
                    "url": "https://hello.example.com",
                    "image": "gcr.io/demo/helloworld",
                    "port": 8080,
                    "ready": "True",
                    "creation_timestamp": "2024-01-01T00:00:00Z",
                    "age": "2h"
                }],
                "success": true
            },
            "error": null
        });
        assert_eq!(output.get_json(), expected);
    }

    #[test]
    fn deployments_print_their_url() {
        let output = AppctlOutput::Deployment(DeploymentOutcome {
            name: "hello".to_string(),
            url: Some("https://hello.example.com".to_string()),
            ready: true,
            failure_reason: None,
        });
        assert_eq!(
            output.get_stdout().unwrap(),
            Some("https://hello.example.com".to_string())
        );
        assert_eq!(output.get_json()["data"]["ready"], json!(true));
    }

    #[test]
    fn empty_success_is_still_success() {
        assert_eq!(
            AppctlOutput::EmptySuccess.get_json()["data"],
            json!({ "success": true })
        );
    }

    #[test]
    fn logins_report_the_expiry() {
        let output = AppctlOutput::LoggedIn {
            user: Some("dev@example.com".to_string()),
            expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        };
        assert_eq!(
            output.get_json()["data"]["expires_at"],
            json!("2030-01-01T00:00:00+00:00")
        );
    }

    #[test]
    fn errors_in_json_are_unsuccessful() {
        let error = AppctlError::new(DeployError::RateLimited(
            "Maximum app deploy limit reached".to_string(),
        ));
        let actual = json!(JsonOutput::from(error));
        assert_eq!(actual["json_version"], json!("1"));
        assert_eq!(actual["data"], json!({ "success": false }));
        assert_eq!(actual["error"]["code"], json!("E005"));
        assert_eq!(
            actual["error"]["message"],
            json!("Maximum app deploy limit reached")
        );
    }
}
