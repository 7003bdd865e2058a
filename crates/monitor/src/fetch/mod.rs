//! Single-attempt HTTP retrieval with a fixed policy.
//!
//! The policy is deliberate and non-configurable:
//!
//! - TLS certificate validation is disabled. The tool detects content
//!   change, not trust; self-signed and expired certificates are fine.
//! - Redirects are never followed. A 3xx response is itself the observed
//!   result.
//! - No connection reuse across calls. A pass hits many distinct hosts
//!   with a low repeat rate, so pooling buys nothing.
//! - The body read is capped, so a large response never buffers past the
//!   normalization limit.
//!
//! One attempt per endpoint per run; any failure skips that endpoint.

pub mod url;

use bytes::{Bytes, BytesMut};
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, validate};

use crate::normalize::RESPONSE_BODY_LIMIT;
use driftwatch_core::Error;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "driftwatch/0.1")
    pub user_agent: String,

    /// Total request timeout (default: 8s)
    pub timeout: Duration,

    /// Cap on body bytes read from the wire (default: 3MB)
    pub body_limit: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "driftwatch/0.1".to_string(),
            timeout: Duration::from_millis(8_000),
            body_limit: RESPONSE_BODY_LIMIT,
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Protocol and status, e.g. "HTTP/1.1 200 OK"
    pub status_line: String,
    /// Response headers
    pub headers: header::HeaderMap,
    /// Body bytes, already capped at the configured limit
    pub body: Bytes,
    /// Content-Type header, used to decide script reformatting
    pub content_type: Option<String>,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

/// A single bounded-time HTTP retrieval.
///
/// The engine is generic over this so tests can substitute a mock.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync + 'static {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, Error>;
}

/// HTTP fetch client implementing the fixed retrieval policy.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(true)
            .pool_max_idle_per_host(0)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Fetch(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl Fetcher for FetchClient {
    /// Fetch a URL, returning the status line, headers, and capped body.
    ///
    /// Every status code is an observed result; a 404 or a 502 is content
    /// to compare, not an error. Only network, TLS, and timeout failures
    /// are reported as `Error::Fetch`.
    async fn fetch(&self, url_str: &str) -> Result<FetchResponse, Error> {
        let start = Instant::now();

        let mut response = self
            .http
            .get(url_str)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("{url_str}: {e}")))?;

        let status_line = format!("{:?} {}", response.version(), response.status());
        let headers = response.headers().clone();

        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::Fetch(format!("{url_str}: {e}")))?
        {
            let remaining = self.config.body_limit - body.len();
            if chunk.len() >= remaining {
                body.extend_from_slice(&chunk[..remaining]);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} in {}ms ({} bytes)", url_str, fetch_ms, body.len());

        Ok(FetchResponse { status_line, headers, body: body.freeze(), content_type, fetch_ms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "driftwatch/0.1");
        assert_eq!(config.timeout, Duration::from_millis(8_000));
        assert_eq!(config.body_limit, RESPONSE_BODY_LIMIT);
    }

    #[test]
    fn test_fetch_response_fields() {
        let response = FetchResponse {
            status_line: "HTTP/1.1 200 OK".to_string(),
            headers: header::HeaderMap::new(),
            body: Bytes::from_static(b"hello"),
            content_type: Some("text/html".to_string()),
            fetch_ms: 100,
        };

        assert_eq!(response.status_line, "HTTP/1.1 200 OK");
        assert_eq!(response.body.as_ref(), b"hello");
        assert_eq!(response.content_type, Some("text/html".to_string()));
        assert_eq!(response.fetch_ms, 100);
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        let config = FetchConfig::default();
        let client = FetchClient::new(config);
        assert!(client.is_ok());
    }
}
