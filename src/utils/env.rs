use std::collections::HashMap;
use std::{env, fmt, io};

use heck::ToShoutySnakeCase;

/// AppctlEnv allows us to mock environment variables while
/// running tests. That way we can run our tests in parallel,
/// and our local development environment will not have unintended
/// side effects on our tests.
#[derive(Debug, Clone)]
pub struct AppctlEnv {
    mock_store: Option<HashMap<String, String>>,
}

impl Default for AppctlEnv {
    fn default() -> AppctlEnv {
        AppctlEnv::new()
    }
}

impl AppctlEnv {
    /// creates a new environment variable store
    pub fn new() -> AppctlEnv {
        let mock_store = if cfg!(test) {
            Some(HashMap::new())
        } else {
            None
        };

        AppctlEnv { mock_store }
    }

    /// returns the value of the environment variable if it exists
    pub fn get(&self, key: AppctlEnvKey) -> io::Result<Option<String>> {
        let key_str = key.to_string();
        tracing::trace!("Checking for ${}", &key_str);
        let result = match &self.mock_store {
            Some(mock_store) => Ok(mock_store.get(&key_str).map(|v| v.to_owned())),
            None => match env::var(&key_str) {
                Ok(data) => Ok(Some(data)),
                Err(env::VarError::NotPresent) => Ok(None),
                Err(env::VarError::NotUnicode(_)) => Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("The value of the environment variable \"{key_str}\" is not valid Unicode."),
                )),
            },
        }?;

        if let Some(result) = &result {
            tracing::debug!("read environment variable ${} = {}", &key_str, result);
        } else {
            tracing::trace!("could not find ${}", &key_str);
        }

        Ok(result)
    }

    /// returns the value of the environment variable, treating a blank value as unset
    pub fn get_non_empty(&self, key: AppctlEnvKey) -> io::Result<Option<String>> {
        Ok(self.get(key)?.filter(|value| !value.trim().is_empty()))
    }

    /// whether the variable is set to something other than a falsy value
    pub fn is_set(&self, key: AppctlEnvKey) -> io::Result<bool> {
        Ok(matches!(
            self.get(key)?.as_deref().map(str::trim),
            Some(value) if !matches!(value, "" | "0" | "false" | "False" | "FALSE")
        ))
    }

    /// sets a variable in the mock store
    #[cfg(test)]
    pub fn insert(&mut self, key: AppctlEnvKey, value: &str) {
        if let Some(mock_store) = &mut self.mock_store {
            mock_store.insert(key.to_string(), value.into());
        }
    }
}

/// AppctlEnvKey defines all of the environment variables
/// that are respected by appctl. Any time a new environment variable
/// is added to the public contract, it should be defined here.
/// Each environment variable is prefixed with `APPCTL_` and
/// the suffix is the name of the key defined here. It will automatically
/// be converted from CamelCase to SHOUTY_SNAKE_CASE.
/// For example, `AppctlEnvKey::ConfigHome.to_string()` becomes `APPCTL_CONFIG_HOME`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppctlEnvKey {
    ConfigHome,
    AppUrl,
    AuthDomain,
    ClientId,
    TelemetryUrl,
    TelemetryDisabled,
    TelemetryWriteKey,
}

impl fmt::Display for AppctlEnvKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let dbg = format!("{self:?}").to_shouty_snake_case();
        write!(fmt, "APPCTL_{dbg}")
    }
}
