//! Fetching source webpage content.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::FetchError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "Mozilla/5.0 (compatible; Skillet/1.0; +https://skillet.app)";

/// Trait for fetching a URL's content as text, enabling mockability in tests.
#[async_trait]
pub trait SourceClient: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Production source fetcher.
///
/// One plain GET per call: no caching and no rate limiting, so concurrent
/// relay invocations share nothing.
pub struct HttpSourceClient {
    inner: reqwest::Client,
}

impl HttpSourceClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl SourceClient for HttpSourceClient {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        tracing::debug!(url, "fetching source content");
        let response = self.inner.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = %status, "source request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| FetchError::InvalidEncoding(format!("Invalid UTF-8 in response: {}", e)))
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    Text(String),
    Status(u16),
    Error(String),
}

/// Mock source client for testing.
#[derive(Default)]
pub struct MockSourceClient {
    responses: HashMap<String, MockResponse>,
}

impl MockSourceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Add a text body for a URL.
    pub fn with_text(self, url: &str, text: &str) -> Self {
        self.with_response(url, MockResponse::Text(text.to_string()))
    }

    /// Add a non-success HTTP status for a URL.
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.with_response(url, MockResponse::Status(status))
    }
}

#[async_trait]
impl SourceClient for MockSourceClient {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        match self.responses.get(url) {
            Some(MockResponse::Text(text)) => Ok(text.clone()),
            Some(MockResponse::Status(status)) => Err(FetchError::Status { status: *status }),
            Some(MockResponse::Error(e)) => Err(FetchError::InvalidUrl(e.clone())),
            None => Err(FetchError::InvalidUrl(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}
