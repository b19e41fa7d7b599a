//! HTTP transport built on reqwest

use super::Transport;
use crate::config::ClientConfig;
use crate::config::validation::validate_client_config;
use crate::error::{MochowError, Result, TransportError};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Actions that only read, and so may be resent after the outcome of an
/// attempt is unknown
const IDEMPOTENT_ACTIONS: &[&str] = &["search", "batchSearch", "query", "select", "list"];

/// Sends requests to `{endpoint}/{version}` with the account credentials
pub struct HttpTransport {
    config: ClientConfig,
    http_client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a new transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        validate_client_config(&config)?;

        let http_client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(TransportError::Network)?;

        Ok(Self::with_http_client(config, http_client))
    }

    /// Create transport with custom HTTP client
    pub fn with_http_client(config: ClientConfig, http_client: Client) -> Self {
        let base_url = config.base_url();
        Self {
            config,
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send with retry on gateway errors and, for reads, on network failures.
    ///
    /// A write is only resent when the previous attempt never reached the
    /// service: a refused connection or a 502/503/504 from a gateway.
    async fn send(&self, method: Method, path: &str, action: Option<&str>, body: &Value) -> Result<Value> {
        let max_attempts = self.config.max_retries.max(1);
        let idempotent = action.map_or(false, |a| IDEMPOTENT_ACTIONS.contains(&a));
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.try_send(method.clone(), path, action, body).await {
                Ok(response) => {
                    debug!("{} {} succeeded on attempt {}", method, path, attempts);
                    return Ok(response);
                }
                Err(e) if attempts < max_attempts && is_retryable(&e, idempotent) => {
                    warn!("{} {} failed on attempt {}: {}", method, path, attempts, e);

                    // Exponential backoff with jitter
                    let base_delay = 100 * 2_u64.pow(attempts - 1);
                    let delay = base_delay.min(30_000);
                    let jitter = delay as f64 * 0.25 * (rand::random::<f64>() - 0.5);
                    let final_delay = Duration::from_millis((delay as f64 + jitter).max(0.0) as u64);

                    debug!("Retrying after {}ms", final_delay.as_millis());
                    tokio::time::sleep(final_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Make a single HTTP request
    async fn try_send(&self, method: Method, path: &str, action: Option<&str>, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {} action={:?}", method, url, action);

        let mut request = self.http_client
            .request(method, &url)
            .header("Authorization", self.config.authorization())
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(action) = action {
            request = request.query(&[(action, "")]);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(path, e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(path, e))?;

        // The service reports failures in-body through `code`/`msg`, so any
        // JSON body is handed back regardless of the status.
        match serde_json::from_str::<Value>(&text) {
            Ok(value) if !is_gateway_error(status) => Ok(value),
            _ => {
                error!("Request to {} failed with status {}: {}", path, status, text);
                Err(TransportError::UnexpectedResponse {
                    status: status.as_u16(),
                    body: text,
                }
                .into())
            }
        }
    }

    fn map_send_error(&self, path: &str, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            warn!("{} request timed out", path);
            TransportError::Timeout(self.config.timeout_ms)
        } else {
            TransportError::Network(err)
        }
    }
}

fn is_gateway_error(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

fn is_retryable(err: &MochowError, idempotent: bool) -> bool {
    match err {
        MochowError::Transport(TransportError::Network(e)) => idempotent || e.is_connect(),
        MochowError::Transport(TransportError::Timeout(_)) => idempotent,
        MochowError::Transport(TransportError::UnexpectedResponse { status, .. }) => {
            StatusCode::from_u16(*status).map(is_gateway_error).unwrap_or(false)
        }
        _ => false,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, action: Option<&str>, body: Value) -> Result<Value> {
        self.send(Method::POST, path, action, &body).await
    }

    async fn delete(&self, path: &str, action: Option<&str>, body: Value) -> Result<Value> {
        self.send(Method::DELETE, path, action, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn test_config(endpoint: &str) -> ClientConfig {
        let mut config = ClientConfig::new(endpoint, "root", "secret");
        config.timeout_ms = 2_000;
        config.max_retries = 3;
        config
    }

    fn slow_body(delay_ms: u64) -> impl Fn(&mut dyn std::io::Write) -> std::io::Result<()> + Send + Sync + 'static {
        move |w| {
            std::thread::sleep(Duration::from_millis(delay_ms));
            w.write_all(br#"{"code":0,"msg":"Success"}"#)
        }
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let result = HttpTransport::new(ClientConfig::new("localhost:8287", "root", "secret"));
        assert!(matches!(result, Err(MochowError::Config(msg)) if msg.contains("http")));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let result = HttpTransport::new(ClientConfig::new("http://127.0.0.1:8287", "root", ""));
        assert!(matches!(result, Err(MochowError::Config(msg)) if msg.contains("API key")));
    }

    #[test]
    fn test_retry_policy() {
        let timeout: MochowError = TransportError::Timeout(150).into();
        assert!(is_retryable(&timeout, true));
        assert!(!is_retryable(&timeout, false));

        let gateway: MochowError = TransportError::UnexpectedResponse {
            status: 502,
            body: String::new(),
        }
        .into();
        assert!(is_retryable(&gateway, false));

        let server_error: MochowError = TransportError::UnexpectedResponse {
            status: 500,
            body: String::new(),
        }
        .into();
        assert!(!is_retryable(&server_error, true));
    }

    #[tokio::test]
    async fn test_timed_out_insert_is_sent_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/row")
            .match_query(Matcher::UrlEncoded("insert".into(), "".into()))
            .with_status(200)
            .with_chunked_body(slow_body(400))
            .expect(1)
            .create_async()
            .await;

        let mut config = test_config(&server.url());
        config.timeout_ms = 150;
        let transport = HttpTransport::new(config).unwrap();
        let result = transport
            .post("/row", Some("insert"), json!({ "rows": [{ "id": "0001" }] }))
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(MochowError::Transport(TransportError::Timeout(150)))));
    }

    #[tokio::test]
    async fn test_timed_out_search_is_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/row")
            .match_query(Matcher::UrlEncoded("search".into(), "".into()))
            .with_status(200)
            .with_chunked_body(slow_body(400))
            .expect(3)
            .create_async()
            .await;

        let mut config = test_config(&server.url());
        config.timeout_ms = 150;
        let transport = HttpTransport::new(config).unwrap();
        let result = transport.post("/row", Some("search"), json!({})).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(MochowError::Transport(TransportError::Timeout(_)))));
    }

    #[tokio::test]
    async fn test_post_sends_action_and_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/database")
            .match_query(Matcher::UrlEncoded("create".into(), "".into()))
            .match_header("authorization", "Bearer account=root&api_key=secret")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "database": "book" })))
            .with_status(200)
            .with_body(r#"{"code":0,"msg":"Success"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(test_config(&server.url())).unwrap();
        let response = transport
            .post("/database", Some("create"), json!({ "database": "book" }))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response["code"], json!(0));
    }

    #[tokio::test]
    async fn test_error_code_body_is_returned() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/row")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"code":69,"msg":"Table not exist"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(test_config(&server.url())).unwrap();
        let response = transport.post("/row", Some("search"), json!({})).await.unwrap();

        assert_eq!(response["code"], json!(69));
    }

    #[tokio::test]
    async fn test_retries_on_service_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/v1/database")
            .with_status(503)
            .with_body("unavailable")
            .expect(3)
            .create_async()
            .await;

        let transport = HttpTransport::new(test_config(&server.url())).unwrap();
        let result = transport.delete("/database", None, json!({ "database": "book" })).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(MochowError::Transport(TransportError::UnexpectedResponse { status: 503, .. }))
        ));
    }

    #[tokio::test]
    async fn test_non_json_body_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/row")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("<html>oops</html>")
            .expect(1)
            .create_async()
            .await;

        let transport = HttpTransport::new(test_config(&server.url())).unwrap();
        let result = transport.post("/row", Some("insert"), json!({})).await;

        assert!(matches!(
            result,
            Err(MochowError::Transport(TransportError::UnexpectedResponse { status: 500, .. }))
        ));
    }
}
