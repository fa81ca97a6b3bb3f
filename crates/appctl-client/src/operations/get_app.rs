use houston::Session;
use reqwest::{Method, StatusCode};

use crate::{App, AppClient, AppClientError};

/// Fetches the app called `name`.
pub async fn run(client: &AppClient, name: &str, session: &Session) -> Result<App, AppClientError> {
    let request = client.request(Method::GET, client.url_for(name), session);
    let reply = client.send(request).await?;
    if reply.status == StatusCode::NOT_FOUND {
        return Err(not_found(name));
    }
    let body = reply.check()?;
    // the backend answers an unknown name with an empty body
    if body.trim().is_empty() {
        return Err(not_found(name));
    }
    Ok(App::from_value(serde_json::from_str(&body)?))
}

fn not_found(name: &str) -> AppClientError {
    AppClientError::NotFound {
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;
    use speculoos::prelude::*;

    use super::run;
    use crate::operations::test_support::{client, session, TOKEN};
    use crate::AppClientError;

    #[tokio::test]
    async fn it_fetches_an_app_with_the_session_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/apps/hello")
                .header("authorization", format!("Bearer {TOKEN}"));
            then.status(200).json_body(json!({
                "metadata": {"name": "hello"},
                "status": {"url": "https://hello.example.com"}
            }));
        });

        let app = run(&client(&server), "hello", &session()).await.unwrap();
        mock.assert();
        assert_that!(app.record().name()).is_equal_to(Some("hello"));
        assert_that!(app.raw()["status"]["url"]).is_equal_to(&json!("https://hello.example.com"));
    }

    #[tokio::test]
    async fn missing_apps_are_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/apps/ghost");
            then.status(404);
        });

        let result = run(&client(&server), "ghost", &session()).await;
        assert!(matches!(result, Err(AppClientError::NotFound { name }) if name == "ghost"));
    }

    #[tokio::test]
    async fn an_empty_answer_means_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/apps/ghost");
            then.status(200).body("");
        });

        let result = run(&client(&server), "ghost", &session()).await;
        assert!(matches!(result, Err(AppClientError::NotFound { .. })));
    }

    #[tokio::test]
    async fn a_rejected_token_is_forbidden() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/apps/hello");
            then.status(403);
        });

        let result = run(&client(&server), "hello", &session()).await;
        assert!(matches!(result, Err(AppClientError::Forbidden)));
    }

    #[tokio::test]
    async fn garbage_is_invalid_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/apps/hello");
            then.status(200).body("<html>");
        });

        let result = run(&client(&server), "hello", &session()).await;
        assert!(matches!(result, Err(AppClientError::InvalidJson(_))));
    }
}
