//! Logging in, and reading the login back for authenticated commands.

use appctl_client::{AppClientError, BackendClient};
use appctl_oauth::{DeviceFlow, DeviceGrant, IdentityProvider, OAuthError};
use appctl_std::Clock;
use chrono::{DateTime, Utc};
use houston::{HoustonProblem, Session, SessionStore};
use sputnik::Telemetry;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::telemetry::{outcome_event, User, LOGIN};

#[derive(Error, Debug)]
pub enum LoginError {
    #[error(transparent)]
    Authorization(#[from] OAuthError),

    #[error("Could not save the login session.")]
    SessionNotSaved(#[source] HoustonProblem),

    #[error("Login could not be completed because the backend is unavailable. Please try again later.")]
    BackendUnavailable(#[source] AppClientError),
}

/// Why an authenticated command can't run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthRequired {
    #[error("You are not logged in.")]
    NotLoggedIn,

    #[error("Your login has expired.")]
    Expired,

    #[error("The stored login is not usable: {0}")]
    Invalid(String),
}

/// Loads the session and checks it was issued to `client_id` and is still valid at `now`.
pub fn require_session(
    store: &dyn SessionStore,
    client_id: &str,
    now: DateTime<Utc>,
) -> Result<(Session, Option<User>), AuthRequired> {
    let session = store.load().map_err(|problem| match problem {
        HoustonProblem::NoSession(_) => AuthRequired::NotLoggedIn,
        problem => AuthRequired::Invalid(problem.to_string()),
    })?;
    session
        .validate(client_id, now)
        .map_err(|problem| match problem {
            HoustonProblem::SessionExpired => AuthRequired::Expired,
            problem => AuthRequired::Invalid(problem.to_string()),
        })?;
    let user = User::from_session(&session);
    Ok((session, user))
}

/// Runs the device authorization grant and records the resulting session.
pub struct Login<'a> {
    provider: &'a dyn IdentityProvider,
    backend: &'a dyn BackendClient,
    store: &'a dyn SessionStore,
    clock: &'a dyn Clock,
    telemetry: &'a dyn Telemetry,
}

impl<'a> Login<'a> {
    pub fn new(
        provider: &'a dyn IdentityProvider,
        backend: &'a dyn BackendClient,
        store: &'a dyn SessionStore,
        clock: &'a dyn Clock,
        telemetry: &'a dyn Telemetry,
    ) -> Self {
        Login {
            provider,
            backend,
            store,
            clock,
            telemetry,
        }
    }

    /// Obtains a session, persists it and registers the login with the backend.
    ///
    /// `on_grant` is called once the user code is known so it can be shown.
    /// If the backend can't be told about the login, the saved session is
    /// removed again and nothing is left on disk.
    pub async fn run<F>(&self, cancel: &CancellationToken, on_grant: F) -> Result<Session, LoginError>
    where
        F: FnOnce(&DeviceGrant),
    {
        let result = self.authorize(cancel, on_grant).await;
        let user = result.as_ref().ok().and_then(User::from_session);
        self.telemetry
            .emit(outcome_event(LOGIN, &result, user.as_ref(), None));
        result
    }

    async fn authorize<F>(&self, cancel: &CancellationToken, on_grant: F) -> Result<Session, LoginError>
    where
        F: FnOnce(&DeviceGrant),
    {
        let flow = DeviceFlow::new(self.provider, self.clock);
        let grant = flow.request_device_grant().await?;
        on_grant(&grant);

        let session = flow.await_token(&grant, cancel).await?;
        self.store
            .save(&session)
            .map_err(LoginError::SessionNotSaved)?;

        if let Err(error) = self.backend.register_login(&session).await {
            tracing::debug!(%error, "registering the login failed, removing the session");
            if let Err(problem) = self.store.clear() {
                tracing::warn!(%problem, "could not remove the session");
            }
            return Err(LoginError::BackendUnavailable(error));
        }
        Ok(session)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Mutex;

    use houston::{HoustonProblem, Session, SessionStore};

    /// A session store that lives in memory.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        session: Mutex<Option<Session>>,
    }

    impl MemoryStore {
        pub(crate) fn holding(session: Session) -> Self {
            MemoryStore {
                session: Mutex::new(Some(session)),
            }
        }

        pub(crate) fn current(&self) -> Option<Session> {
            self.session.lock().unwrap().clone()
        }
    }

    impl SessionStore for MemoryStore {
        fn load(&self) -> Result<Session, HoustonProblem> {
            self.current()
                .ok_or_else(|| HoustonProblem::NoSession("memory".to_string()))
        }

        fn save(&self, session: &Session) -> Result<(), HoustonProblem> {
            *self.session.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), HoustonProblem> {
            *self.session.lock().unwrap() = None;
            Ok(())
        }
    }
}
