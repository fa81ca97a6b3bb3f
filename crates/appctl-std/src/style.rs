use console::style;

pub enum Style {
    Link,     // URLs
    Command,  // Commands, inline code and env variable keys
    AppName,  // Names of deployed apps
    UserCode, // Device confirmation codes
    Failure,
    Pending,
    HintPrefix,    // "HINT:" text
    InfoPrefix,    // "==>": text
    WarningPrefix, // "warning:" text
    ErrorPrefix,   // "error:" and "error[code]:" text
    Heading,
    Success,
}

impl Style {
    pub fn paint<S: AsRef<str>>(&self, message: S) -> String {
        let message_ref = message.as_ref();

        if is_no_color_set() {
            return message_ref.to_string();
        }

        match &self {
            Style::Link => style(message_ref).cyan().underlined(),
            Style::Command | Style::AppName | Style::UserCode => style(message_ref).yellow(),
            Style::Failure => style(message_ref).red(),
            Style::Pending | Style::WarningPrefix => style(message_ref).yellow(),
            Style::HintPrefix => style(message_ref).cyan().bold(),
            Style::InfoPrefix => style(message_ref).blue().bold(),
            Style::ErrorPrefix => style(message_ref).red().bold(),
            Style::Heading => style(message_ref).bold(),
            Style::Success => style(message_ref).green(),
        }
        .to_string()
    }
}

pub fn is_no_color_set() -> bool {
    is_bool_env_var_set("NO_COLOR") || is_bool_env_var_set("APPCTL_NO_COLOR")
}

fn is_bool_env_var_set(key: &str) -> bool {
    !matches!(
        std::env::var(key).as_deref(),
        Err(..) | Ok("") | Ok("0") | Ok("false") | Ok("False") | Ok("FALSE")
    )
}
