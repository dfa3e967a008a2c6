//! The HTTP client the booking API is built on.

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::{Response, ResponseExt};

/// Thin wrapper over `reqwest::Client` that decodes backend rejections.
///
/// Cloning is cheap and shares the connection pool. Requests are sent once;
/// there is no retry.
#[derive(Debug, Clone)]
pub struct WidgetHttpClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl WidgetHttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent.as_str())
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { http, config })
    }

    /// Client built from [`ClientConfig::from_env`].
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Send `request`; a non-2xx status comes back as an [`Error`].
    #[instrument(skip(self, request), fields(method = ?request.method(), url = %request.url()))]
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let trace = self.config.enable_tracing;
        if trace {
            debug!("Sending request");
        }

        let response = Response::new(request.to_reqwest(&self.http).send().await?);

        if trace {
            let status = response.status();
            if response.is_success() {
                debug!(status, "Response received");
            } else {
                info!(status, "Backend rejected request");
            }
        }
        response.check_api_error().await
    }

    /// Send `request` and decode the JSON body as `T`.
    pub async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        self.send(request).await?.json().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = WidgetHttpClient::new(ClientConfig::default()).unwrap();
        assert!(client.config().accept_compressed);
    }

    #[tokio::test]
    async fn test_get_with_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/services/"))
            .and(query_param("business_unit", "3"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "title": "City Tour"}
            ])))
            .mount(&mock_server)
            .await;

        let client = WidgetHttpClient::new(ClientConfig::default()).unwrap();
        let value: serde_json::Value = client
            .send_json(
                client
                    .get(format!("{}/api/services/", mock_server.uri()))
                    .query("business_unit", "3")
                    .accept_json(),
            )
            .await
            .unwrap();

        assert_eq!(value[0]["title"], "City Tour");
    }

    #[tokio::test]
    async fn test_post_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/appointments/"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({"service": "1"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 10
            })))
            .mount(&mock_server)
            .await;

        let client = WidgetHttpClient::new(ClientConfig::default()).unwrap();
        let response = client
            .send(
                client
                    .post(format!("{}/api/appointments/", mock_server.uri()))
                    .json(&serde_json::json!({"service": "1"}))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn test_structured_rejection() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/appointments/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "client_phone": ["invalid"]
            })))
            .mount(&mock_server)
            .await;

        let client = WidgetHttpClient::new(ClientConfig::default()).unwrap();
        let err = client
            .send(client.post(format!("{}/api/appointments/", mock_server.uri())))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.api_body().unwrap()["client_phone"][0], "invalid");
    }

    #[tokio::test]
    async fn test_server_error_is_sent_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/services/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = WidgetHttpClient::new(ClientConfig::default()).unwrap();
        let err = client
            .send(client.get(format!("{}/api/services/", mock_server.uri())))
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_html_body_is_json_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/services/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = WidgetHttpClient::new(ClientConfig::default()).unwrap();
        let err = client
            .send_json::<serde_json::Value>(
                client.get(format!("{}/api/services/", mock_server.uri())),
            )
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Json(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = WidgetHttpClient::new(
            ClientConfig::builder()
                .with_connect_timeout(std::time::Duration::from_millis(500))
                .build(),
        )
        .unwrap();
        let err = client
            .send(client.get("http://127.0.0.1:9/api/services/"))
            .await
            .unwrap_err();

        assert!(err.is_transport(), "{err:?}");
    }
}
