use appctl_std::{AppctlStdError, Fs};
use camino::Utf8PathBuf;

use crate::{Config, HoustonProblem, Session};

/// Somewhere a login session can be kept between invocations.
pub trait SessionStore: Send + Sync {
    /// Loads the current session, failing with [`HoustonProblem::NoSession`] if there is none.
    fn load(&self) -> Result<Session, HoustonProblem>;

    /// Replaces the current session.
    fn save(&self, session: &Session) -> Result<(), HoustonProblem>;

    /// Forgets the current session. Succeeds when there was none.
    fn clear(&self) -> Result<(), HoustonProblem>;
}

/// Keeps the session as JSON in the configuration home, readable only by the owner.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: Utf8PathBuf,
}

impl FileSessionStore {
    /// Stores the session at the default location under `config`.
    pub fn new(config: &Config) -> FileSessionStore {
        FileSessionStore {
            path: config.session_path(),
        }
    }

    /// Where the session lives on disk.
    pub fn path(&self) -> &Utf8PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session, HoustonProblem> {
        let contents = match Fs::read_file(&self.path) {
            Ok(contents) => contents,
            Err(AppctlStdError::MissingFile { .. }) | Err(AppctlStdError::EmptyFile { .. }) => {
                return Err(HoustonProblem::NoSession(self.path.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&contents).map_err(|source| HoustonProblem::CorruptedSession {
            path: self.path.to_string(),
            source,
        })
    }

    fn save(&self, session: &Session) -> Result<(), HoustonProblem> {
        let contents = serde_json::to_string_pretty(session)?;
        tracing::debug!(path = %self.path, expires_at = %session.expires_at(), "saving session");
        Fs::write_private_file(&self.path, contents)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), HoustonProblem> {
        Fs::remove_file(&self.path)?;
        Ok(())
    }
}
