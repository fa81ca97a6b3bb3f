use houston::Session;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::{App, AppClient, AppClientError};

#[derive(Debug, Default, Deserialize)]
struct AppList {
    #[serde(default)]
    items: Option<Vec<Value>>,
}

/// Lists every app the user owns.
pub async fn run(client: &AppClient, session: &Session) -> Result<Vec<App>, AppClientError> {
    let request = client.request(Method::GET, client.base_url().clone(), session);
    let body = client.send(request).await?.check()?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let list: AppList = serde_json::from_str(&body)?;
    Ok(list
        .items
        .unwrap_or_default()
        .into_iter()
        .map(App::from_value)
        .collect())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::run;
    use crate::operations::test_support::{client, session};
    use crate::AppClientError;

    #[tokio::test]
    async fn it_lists_apps() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v1/apps");
            then.status(200).json_body(json!({"items": [
                {"metadata": {"name": "hello"}},
                {"metadata": {"name": "world"}}
            ]}));
        });

        let apps = run(&client(&server), &session()).await.unwrap();
        mock.assert();
        let names: Vec<_> = apps.iter().filter_map(|app| app.record().name()).collect();
        assert_eq!(names, vec!["hello", "world"]);
    }

    #[tokio::test]
    async fn no_items_means_no_apps() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/apps");
            then.status(200).json_body(json!({"items": null}));
        });

        assert!(run(&client(&server), &session()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn server_errors_are_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/apps");
            then.status(500);
        });

        assert!(matches!(
            run(&client(&server), &session()).await,
            Err(AppClientError::ServerError)
        ));
    }
}
