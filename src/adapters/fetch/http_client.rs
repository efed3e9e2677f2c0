//! HTTP Ad Fetch Client - AdFetchClient over the ad backend's REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpAdFetchConfig::new("https://api.jackymedia.com")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = HttpAdFetchClient::new(config)?;
//! ```
//!
//! # Protocol
//!
//! One `GET {base_url}/v1/interstitials?orientation=..&test=..` per fetch,
//! authenticated with `x-api-key` / `x-api-secret` headers. The backend
//! answers 200 with an ad, 204/404 when it has nothing to serve, and 401/403
//! with a JSON error code when the app or event is not accepted.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::BackendConfig;
use crate::domain::interstitial::AdPayload;
use crate::ports::{AdFetchClient, FetchError, FetchRequest};
use crate::SDK_VERSION;

/// Configuration for the HTTP fetch client.
#[derive(Debug, Clone)]
pub struct HttpAdFetchConfig {
    /// Base URL of the ad backend (default: https://api.jackymedia.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpAdFetchConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&BackendConfig> for HttpAdFetchConfig {
    fn from(backend: &BackendConfig) -> Self {
        Self::new(backend.base_url.clone()).with_timeout(backend.timeout())
    }
}

/// Ad backend client.
pub struct HttpAdFetchClient {
    config: HttpAdFetchConfig,
    client: Client,
}

impl HttpAdFetchClient {
    /// Creates a client; fails only if the TLS backend cannot initialise.
    pub fn new(config: HttpAdFetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("affiliate-sdk/{}", SDK_VERSION))
            .build()
            .map_err(|e| FetchError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the interstitials endpoint URL.
    fn interstitials_url(&self) -> String {
        format!(
            "{}/v1/interstitials",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl AdFetchClient for HttpAdFetchClient {
    async fn fetch(&self, request: FetchRequest) -> Result<AdPayload, FetchError> {
        let mut builder = self
            .client
            .get(self.interstitials_url())
            .query(&[
                ("orientation", request.orientation.as_str()),
                ("test", if request.test_mode { "true" } else { "false" }),
            ])
            .header("x-api-key", request.credentials.api_key())
            .header("x-api-secret", request.credentials.api_secret())
            .header("x-sdk-version", SDK_VERSION);
        if let Some(advertising_id) = &request.advertising_id {
            builder = builder.header("x-advertising-id", advertising_id);
        }

        debug!(
            orientation = %request.orientation,
            test_mode = request.test_mode,
            "Requesting interstitial from backend"
        );
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status == StatusCode::OK {
            return serde_json::from_str(&body)
                .map_err(|e| FetchError::malformed(format!("Failed to parse ad: {}", e)));
        }

        debug!(status = status.as_u16(), "Backend declined interstitial request");
        Err(status_error(status, &body))
    }
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::network(err.to_string())
    }
}

/// Maps a non-200 response to a fetch error.
fn status_error(status: StatusCode, body: &str) -> FetchError {
    match status.as_u16() {
        204 | 404 => FetchError::NoInventory,
        401 | 403 => auth_error(body),
        code => FetchError::backend(code, body),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
}

/// Reads the backend's error code from a 401/403 body.
fn auth_error(body: &str) -> FetchError {
    let code = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.code)
        .unwrap_or_default();

    match code.as_str() {
        "invalid_api_secret" => FetchError::InvalidApiSecret,
        "event_not_verified" => FetchError::EventNotVerified,
        _ => FetchError::InvalidApiKey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interstitial::{AdTarget, Credentials, Orientation};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves a single canned response and hands back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (base_url, server)
    }

    fn request(advertising_id: Option<&str>) -> FetchRequest {
        FetchRequest {
            credentials: Credentials::new("app-key", "app-secret").unwrap(),
            orientation: Orientation::LandscapeLeft,
            test_mode: true,
            advertising_id: advertising_id.map(str::to_string),
        }
    }

    fn client(base_url: &str) -> HttpAdFetchClient {
        HttpAdFetchClient::new(
            HttpAdFetchConfig::new(base_url).with_timeout(Duration::from_secs(5)),
        )
        .unwrap()
    }

    #[test]
    fn config_from_backend_settings() {
        let backend = BackendConfig {
            base_url: "https://ads.example.com/".to_string(),
            timeout_secs: 7,
        };

        let config = HttpAdFetchConfig::from(&backend);
        let client = HttpAdFetchClient::new(config.clone()).unwrap();

        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(
            client.interstitials_url(),
            "https://ads.example.com/v1/interstitials"
        );
    }

    #[test]
    fn empty_or_missing_inventory_statuses() {
        assert_eq!(status_error(StatusCode::NO_CONTENT, ""), FetchError::NoInventory);
        assert_eq!(status_error(StatusCode::NOT_FOUND, "nope"), FetchError::NoInventory);
    }

    #[test]
    fn auth_failures_read_the_error_code() {
        let body = |code: &str| format!(r#"{{"error":{{"code":"{}"}}}}"#, code);

        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, &body("invalid_api_key")),
            FetchError::InvalidApiKey
        );
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, &body("invalid_api_secret")),
            FetchError::InvalidApiSecret
        );
        assert_eq!(
            status_error(StatusCode::FORBIDDEN, &body("event_not_verified")),
            FetchError::EventNotVerified
        );
        assert_eq!(
            status_error(StatusCode::FORBIDDEN, "<html>denied</html>"),
            FetchError::InvalidApiKey
        );
    }

    #[test]
    fn server_errors_keep_status_and_body() {
        assert_eq!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, "maintenance"),
            FetchError::backend(503, "maintenance")
        );
    }

    #[tokio::test]
    async fn fetch_sends_credentials_and_parses_ad() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"ad_id":"ad-1","creative_url":"https://cdn.example.com/ad-1.html","target":{"type":"app_store","product_id":"42","fallback_url":"https://apps.example.com/42"},"expires_in":120}"#,
        )
        .await;

        let payload = client(&base_url)
            .fetch(request(Some("idfa-9")))
            .await
            .unwrap();
        let raw = server.await.unwrap().to_lowercase();

        assert_eq!(payload.ad_id, "ad-1");
        assert_eq!(payload.ttl(), Some(Duration::from_secs(120)));
        assert_eq!(
            payload.target,
            AdTarget::AppStore {
                product_id: "42".to_string(),
                fallback_url: "https://apps.example.com/42".to_string(),
            }
        );
        assert!(raw.starts_with("get /v1/interstitials?orientation=landscape_left&test=true "));
        assert!(raw.contains("x-api-key: app-key"));
        assert!(raw.contains("x-api-secret: app-secret"));
        assert!(raw.contains("x-advertising-id: idfa-9"));
        assert!(raw.contains(&format!("x-sdk-version: {}", SDK_VERSION)));
    }

    #[tokio::test]
    async fn fetch_classifies_rejected_secret() {
        let (base_url, server) = serve_once(
            "401 Unauthorized",
            r#"{"error":{"code":"invalid_api_secret","message":"bad secret"}}"#,
        )
        .await;

        let result = client(&base_url).fetch(request(None)).await;
        let raw = server.await.unwrap().to_lowercase();

        assert_eq!(result, Err(FetchError::InvalidApiSecret));
        assert!(!raw.contains("x-advertising-id"));
    }

    #[tokio::test]
    async fn fetch_reports_unparseable_ad_as_malformed() {
        let (base_url, _server) = serve_once("200 OK", r#"{"unexpected":true}"#).await;

        let result = client(&base_url).fetch(request(None)).await;

        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }

    #[tokio::test]
    async fn fetch_reports_refused_connection_as_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let result = client(&base_url).fetch(request(None)).await;

        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
