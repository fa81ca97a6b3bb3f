use houston::Session;
use reqwest::Method;

use crate::{AppClient, AppClientError, CreateAppRequest};

/// Submits a new app. The backend only acknowledges; the app becomes ready later.
pub async fn run(
    client: &AppClient,
    request: &CreateAppRequest,
    session: &Session,
) -> Result<(), AppClientError> {
    tracing::debug!(?request, "creating app");
    let http_request = client
        .request(Method::POST, client.base_url().clone(), session)
        .json(request);
    client.send(http_request).await?.check()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::run;
    use crate::operations::test_support::{client, session};
    use crate::{AppClientError, CreateAppRequest, EnvVar};

    #[tokio::test]
    async fn it_posts_the_app() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/apps")
                .header("content-type", "application/json")
                .json_body(json!({
                    "name": "hello",
                    "image": "gcr.io/demo/helloworld",
                    "port": "8080",
                    "envs": [{"key": "MODE", "value": "prod"}]
                }));
            then.status(200);
        });

        let mut request = CreateAppRequest::new("hello", "gcr.io/demo/helloworld");
        request.port = Some("8080".into());
        request.envs = vec![EnvVar::new("MODE", "prod")];
        run(&client(&server), &request, &session()).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn the_deploy_limit_is_surfaced_verbatim() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/apps");
            then.status(429)
                .json_body(json!({"message": "Maximum app deploy limit reached."}));
        });

        let result = run(
            &client(&server),
            &CreateAppRequest::new("hello", "nginx"),
            &session(),
        )
        .await;
        assert!(
            matches!(result, Err(AppClientError::RateLimited(message)) if message == "Maximum app deploy limit reached.")
        );
    }

    #[tokio::test]
    async fn a_closed_port_means_the_backend_is_down() {
        // nothing listens on the discard port of the loopback interface
        let client = crate::AppClient::new(reqwest::Client::new(), "http://127.0.0.1:9/v1/apps").unwrap();
        let result = run(&client, &CreateAppRequest::new("hello", "nginx"), &session()).await;
        assert!(matches!(result, Err(AppClientError::BackendDown)));
    }
}
