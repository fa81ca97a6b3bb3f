use std::time::Duration;

use tokio::net::lookup_host;
use url::{Host, Url};

use crate::AppClientError;

/// How long name resolution may take before the network counts as unreachable.
pub const DEFAULT_PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(3);

/// Resolves the host of `url` so that a missing network fails fast,
/// before any request is attempted.
pub async fn check_connectivity(url: &Url, timeout: Duration) -> Result<(), AppClientError> {
    let domain = match url.host() {
        Some(Host::Domain(domain)) => domain,
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => return Ok(()),
        None => {
            return Err(AppClientError::NetworkUnreachable {
                host: url.to_string(),
            })
        }
    };
    let port = url.port_or_known_default().unwrap_or(80);

    match tokio::time::timeout(timeout, lookup_host((domain, port))).await {
        Ok(Ok(mut addresses)) => match addresses.next() {
            Some(_) => Ok(()),
            None => {
                tracing::debug!(domain, "no addresses found");
                Err(unreachable(domain))
            }
        },
        Ok(Err(e)) => {
            tracing::debug!(domain, "name resolution failed: {e}");
            Err(unreachable(domain))
        }
        Err(_) => {
            tracing::debug!(domain, ?timeout, "name resolution timed out");
            Err(unreachable(domain))
        }
    }
}

fn unreachable(domain: &str) -> AppClientError {
    AppClientError::NetworkUnreachable {
        host: domain.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::check_connectivity;
    use crate::AppClientError;

    #[tokio::test]
    async fn ip_addresses_need_no_lookup() {
        let url = Url::parse("http://127.0.0.1:6112/v1/apps").unwrap();
        assert!(check_connectivity(&url, Duration::ZERO).await.is_ok());
    }

    #[tokio::test]
    async fn localhost_resolves() {
        let url = Url::parse("http://localhost:6112/v1/apps").unwrap();
        assert!(check_connectivity(&url, Duration::from_secs(5)).await.is_ok());
    }

    #[tokio::test]
    async fn a_lookup_that_takes_too_long_is_unreachable() {
        let url = Url::parse("https://apps.example.invalid/v1/apps").unwrap();
        let result = check_connectivity(&url, Duration::ZERO).await;
        assert!(
            matches!(result, Err(AppClientError::NetworkUnreachable { host }) if host == "apps.example.invalid")
        );
    }
}
