//! Outbound page fetching.
//!
//! Fetchers never build their own HTTP client. They receive a [`PageFetcher`]
//! and a [`ClientConfig`] constructed once at startup, so tests can swap the
//! network for canned pages and every timeout and header lives in one value.
//!
//! # Timeouts
//!
//! | Call | Field | Default |
//! |------|-------|---------|
//! | Video results page | `video_timeout` | 10s |
//! | News search page | `news_timeout` | 10s |
//! | Thumbnail enrichment | `enrich_timeout` | 5s |

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Desktop Chrome user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Why a page could not be fetched. Always contained inside a source fetcher.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Explicit client configuration, built once and passed to every fetcher.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    /// Sent on news requests in addition to the user agent.
    pub browser_headers: BTreeMap<String, String>,
    pub video_timeout: Duration,
    pub news_timeout: Duration,
    pub enrich_timeout: Duration,
    /// Look up article images for live news records without a thumbnail.
    pub enrich_thumbnails: bool,
}

impl ClientConfig {
    /// Headers a desktop browser sends when loading a page.
    pub fn default_browser_headers() -> BTreeMap<String, String> {
        [
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.5"),
            ("Upgrade-Insecure-Requests", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            browser_headers: Self::default_browser_headers(),
            video_timeout: Duration::from_secs(10),
            news_timeout: Duration::from_secs(10),
            enrich_timeout: Duration::from_secs(5),
            enrich_thumbnails: false,
        }
    }
}

/// One outbound GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    pub timeout: Duration,
    /// Extra headers on top of the client's user agent.
    pub headers: BTreeMap<String, String>,
}

impl PageRequest {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: &BTreeMap<String, String>) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

/// Fetch an HTML document as text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, request: PageRequest) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    /// Build the underlying client with the configured user agent.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .gzip(true)
            .build()?;
        Ok(Self { http })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(n), Ok(v)) => {
                map.insert(n, v);
            }
            _ => warn!(header = %name, "Dropping invalid header"),
        }
    }
    map
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(url = %request.url))]
    async fn fetch(&self, request: PageRequest) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let PageRequest {
            url,
            timeout,
            headers,
        } = request;

        let response = self
            .http
            .get(&url)
            .headers(header_map(&headers))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.clone(),
                        timeout,
                    }
                } else {
                    FetchError::Request {
                        url: url.clone(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.clone(),
                    timeout,
                }
            } else {
                FetchError::Body {
                    url: url.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        debug!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            bytes = body.len(),
            content_type = content_type.as_deref().unwrap_or(""),
            "Fetched page"
        );
        Ok(body)
    }
}
