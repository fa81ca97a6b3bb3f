use std::time::Duration;

use appctl_client::AppClient;
use appctl_oauth::{HttpIdentityProvider, ProviderConfig};
use houston as config;
use reqwest::Client;
use thiserror::Error;

use crate::utils::env::{AppctlEnv, AppctlEnvKey};
use crate::{AppctlResult, PKG_VERSION};

/// the app-management backend appctl talks to unless told otherwise
pub const DEFAULT_APP_URL: &str = match option_env!("APPCTL_DEFAULT_APP_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:6112/v1/apps",
};

/// the identity provider tenant used for `appctl login`
pub const DEFAULT_AUTH_DOMAIN: &str = match option_env!("APPCTL_DEFAULT_AUTH_DOMAIN") {
    Some(domain) => domain,
    None => "platform9.us.auth0.com",
};

/// the OAuth client registered for appctl
pub const DEFAULT_CLIENT_ID: &str = match option_env!("APPCTL_DEFAULT_CLIENT_ID") {
    Some(client_id) => client_id,
    None => "HEVMcEBvvQ1wnRmzOxlShZXvjp07bnMz",
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Raised before any command runs when a required setting is blank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The following settings are not set: {}.", .0.join(", "))]
pub struct SecretsNotSet(pub Vec<String>);

/// Where appctl's collaborators live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_url: String,
    pub auth_domain: String,
    pub client_id: String,
}

impl Settings {
    /// Environment variables win over the built-in defaults.
    pub fn from_env(env: &AppctlEnv) -> AppctlResult<Settings> {
        Ok(Settings {
            app_url: env
                .get(AppctlEnvKey::AppUrl)?
                .unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
            auth_domain: env
                .get(AppctlEnvKey::AuthDomain)?
                .unwrap_or_else(|| DEFAULT_AUTH_DOMAIN.to_string()),
            client_id: env
                .get(AppctlEnvKey::ClientId)?
                .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
        })
    }

    pub fn ensure_present(&self) -> Result<(), SecretsNotSet> {
        let missing: Vec<String> = [
            (AppctlEnvKey::AppUrl, &self.app_url),
            (AppctlEnvKey::AuthDomain, &self.auth_domain),
            (AppctlEnvKey::ClientId, &self.client_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key.to_string())
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SecretsNotSet(missing))
        }
    }
}

/// Builds the clients every command needs from one set of settings.
pub struct ClientConfig {
    settings: Settings,
    config: config::Config,
    http: Client,
}

impl ClientConfig {
    pub fn new(settings: Settings, config: config::Config) -> AppctlResult<ClientConfig> {
        let http = Client::builder()
            .user_agent(user_agent())
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(ClientConfig {
            settings,
            config,
            http,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &config::Config {
        &self.config
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn backend(&self) -> AppctlResult<AppClient> {
        Ok(AppClient::new(self.http.clone(), &self.settings.app_url)?)
    }

    pub fn identity_provider(&self) -> HttpIdentityProvider {
        HttpIdentityProvider::new(
            self.http.clone(),
            ProviderConfig::new(&self.settings.auth_domain, &self.settings.client_id),
        )
    }

    pub fn session_store(&self) -> config::FileSessionStore {
        config::FileSessionStore::new(&self.config)
    }
}

pub(crate) fn user_agent() -> String {
    if cfg!(debug_assertions) {
        format!("appctl/{PKG_VERSION} (dev)")
    } else {
        format!("appctl/{PKG_VERSION}")
    }
}
