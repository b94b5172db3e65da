//! HTTP plumbing shared by the REST connectors
//!
//! Maps transport errors and status codes onto [`SourceError`] so every
//! connector reports failures the same way.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::SourceError;
use crate::config::SourcesConfig;

/// A pooled HTTP client configured for upstream APIs
#[derive(Debug, Clone)]
pub struct SourceHttp {
    client: Client,
    timeout: Duration,
}

impl SourceHttp {
    pub fn new(config: &SourcesConfig) -> Result<Self, SourceError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| SourceError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send a request and decode a JSON body
    ///
    /// Returns `Ok(None)` for `204 No Content`. `404` becomes
    /// [`SourceError::NotFound`], any other non-success status
    /// [`SourceError::Upstream`].
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<Option<T>, SourceError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %response.url(), "Upstream responded");

        match status {
            StatusCode::NO_CONTENT => return Ok(None),
            StatusCode::NOT_FOUND => return Err(SourceError::NotFound(what.to_string())),
            s if !s.is_success() => {
                return Err(SourceError::Upstream {
                    status: s.as_u16(),
                    message: format!("{} request failed", what),
                })
            },
            _ => {},
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| SourceError::Malformed(format!("{}: {}", what, e)))
    }

    fn transport_error(&self, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout(self.timeout)
        } else if err.is_decode() {
            SourceError::Malformed(err.to_string())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

/// Join a base URL and a path without doubling slashes
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn http() -> SourceHttp {
        SourceHttp::new(&SourcesConfig::default()).unwrap()
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://a/", "/b/c"), "http://a/b/c");
        assert_eq!(join_url("http://a", "b"), "http://a/b");
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/garbage"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let http = http();
        let get = |p: &str| http.client().get(format!("{}{}", server.uri(), p));

        let missing = http.fetch_json::<Value>(get("/missing"), "entry").await;
        assert!(matches!(missing, Err(SourceError::NotFound(_))));

        let broken = http.fetch_json::<Value>(get("/broken"), "entry").await;
        assert!(matches!(broken, Err(SourceError::Upstream { status: 503, .. })));

        let empty = http.fetch_json::<Value>(get("/empty"), "entry").await;
        assert!(matches!(empty, Ok(None)));

        let garbage = http.fetch_json::<Value>(get("/garbage"), "entry").await;
        assert!(matches!(garbage, Err(SourceError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let http = http();
        let result = http
            .fetch_json::<Value>(http.client().get("http://127.0.0.1:1/x"), "entry")
            .await;
        assert!(matches!(result, Err(SourceError::Network(_))));
    }

    #[tokio::test]
    async fn test_slow_upstream_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = SourcesConfig {
            timeout_secs: 1,
            ..SourcesConfig::default()
        };
        let http = SourceHttp::new(&config).unwrap();
        let result = http
            .fetch_json::<Value>(http.client().get(server.uri()), "entry")
            .await;
        assert!(matches!(result, Err(SourceError::Timeout(_))));
    }
}
