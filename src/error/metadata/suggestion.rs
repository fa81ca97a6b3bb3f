use std::fmt::{self, Display};

use appctl_std::Style;
use serde::Serialize;

use crate::utils::env::AppctlEnvKey;

/// `Suggestion` contains possible suggestions for remedying specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Suggestion {
    Login,
    UnsetBlankSettings,
    FixInput,
    UseDifferentName,
    DeleteUnusedApps,
    CheckImage { name: String },
    CheckImagePath,
    ListApps,
    CheckNetwork,
    TryAgainLater,
    RetryLogin,
    SetConfigHome,
    RerunWithDebugLogs,
    Adhoc(String),
}

impl Display for Suggestion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suggestion = match self {
            Suggestion::Login => format!(
                "Please log in with {}.",
                Style::Command.paint("`appctl login`")
            ),
            Suggestion::UnsetBlankSettings => format!(
                "Unset the variables listed above, or give them a value. Run {} for details.",
                Style::Command.paint("`appctl explain E002`")
            ),
            Suggestion::FixInput => format!(
                "Run {} for the accepted formats.",
                Style::Command.paint("`appctl explain E003`")
            ),
            Suggestion::UseDifferentName => format!(
                "Pick a different name, or remove the existing app with {}.",
                Style::Command.paint("`appctl delete -n <name>`")
            ),
            Suggestion::DeleteUnusedApps => format!(
                "Run {} and remove apps you no longer need with {}.",
                Style::Command.paint("`appctl list`"),
                Style::Command.paint("`appctl delete -n <name>`")
            ),
            Suggestion::CheckImage { name } => format!(
                "Check the image path and registry credentials. The app was created anyway; remove it with {} before deploying again.",
                Style::Command.paint(format!("`appctl delete -n {name}`"))
            ),
            Suggestion::CheckImagePath => {
                "Please check the given application image registry path.".to_string()
            }
            Suggestion::ListApps => format!(
                "Run {} to see your apps.",
                Style::Command.paint("`appctl list`")
            ),
            Suggestion::CheckNetwork => format!(
                "Check your network connection and the value of {} if it is set.",
                Style::Command.paint(format!("${}", AppctlEnvKey::AppUrl))
            ),
            Suggestion::TryAgainLater => "Please try again later.".to_string(),
            Suggestion::RetryLogin => format!(
                "Run {} again and approve the request in your browser.",
                Style::Command.paint("`appctl login`")
            ),
            Suggestion::SetConfigHome => format!(
                "Set {} to a writable directory.",
                Style::Command.paint(format!("${}", AppctlEnvKey::ConfigHome))
            ),
            Suggestion::RerunWithDebugLogs => format!(
                "Re-run the command with {} to see the backend's response.",
                Style::Command.paint("`--log debug`")
            ),
            Suggestion::Adhoc(msg) => msg.to_string(),
        };
        write!(formatter, "{}", &suggestion)
    }
}
