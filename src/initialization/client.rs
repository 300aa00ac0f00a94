//! HTTP session initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Builds the HTTP session used for one domain's archive requests.
///
/// The client carries the configured per-request timeout and user agent. Each
/// call returns an independent connection pool, released when dropped.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend or the
/// client cannot be constructed.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(
            TCP_CONNECT_TIMEOUT_SECS.min(config.timeout_seconds.max(1)),
        ))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_sends_configured_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "longevity-test/1.0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config {
            user_agent: "longevity-test/1.0".to_string(),
            ..Config::default()
        };
        let client = init_client(&config).expect("client should build");
        let response = client.get(server.uri()).send().await.expect("request");
        assert!(response.status().is_success());
    }
}
