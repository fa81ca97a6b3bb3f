use houston::Session;
use reqwest::Method;

use crate::{AppClient, AppClientError};

/// Registers a fresh login with the backend.
pub async fn run(client: &AppClient, session: &Session) -> Result<(), AppClientError> {
    let request = client.request(Method::POST, client.url_for("login"), session);
    client.send(request).await?.check()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::run;
    use crate::operations::test_support::{client, session, TOKEN};
    use crate::AppClientError;

    #[tokio::test]
    async fn it_registers_the_login() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/apps/login")
                .header("authorization", format!("Bearer {TOKEN}"));
            then.status(200);
        });

        run(&client(&server), &session()).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn a_failing_backend_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/apps/login");
            then.status(500);
        });

        assert!(matches!(
            run(&client(&server), &session()).await,
            Err(AppClientError::ServerError)
        ));
    }
}
