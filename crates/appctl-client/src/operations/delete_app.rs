use houston::Session;
use reqwest::{Method, StatusCode};

use crate::{AppClient, AppClientError};

/// Deletes the app called `name`.
pub async fn run(client: &AppClient, name: &str, session: &Session) -> Result<(), AppClientError> {
    let request = client.request(Method::DELETE, client.url_for(name), session);
    let reply = client.send(request).await?;
    if reply.status == StatusCode::NOT_FOUND {
        return Err(AppClientError::NotFound {
            name: name.to_string(),
        });
    }
    reply.check()?;
    Ok(())
}
