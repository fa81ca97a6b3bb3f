pub mod create_app;
pub mod delete_app;
pub mod get_app;
pub mod list_apps;
pub mod login;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, Utc};
    use houston::Session;
    use httpmock::MockServer;

    use crate::AppClient;

    pub(crate) const TOKEN: &str = "header.payload.signature";

    pub(crate) fn session() -> Session {
        Session::new(TOKEN, Utc::now() + Duration::hours(1))
    }

    pub(crate) fn client(server: &MockServer) -> AppClient {
        AppClient::new(reqwest::Client::new(), &server.url("/v1/apps")).unwrap()
    }
}
