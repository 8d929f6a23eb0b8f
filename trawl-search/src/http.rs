//! Shared HTTP client for provider requests.
//!
//! One [`reqwest::Client`] (and its connection pool) is built per
//! aggregator and shared read-only by every source task. Each request
//! carries the configured deadline and User-Agent. There are no retries.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::fetcher::Fetcher;
use crate::rule::QUERY_PLACEHOLDER;
use reqwest::header;
use std::time::Duration;

/// Build a [`reqwest::Client`] configured for provider requests.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}

/// Substitute the URL-escaped `query` into the endpoint's placeholder.
pub fn build_url(endpoint: &str, query: &str) -> String {
    endpoint.replacen(QUERY_PLACEHOLDER, &urlencoding::encode(query), 1)
}

/// Fetches provider bodies with a single GET per call.
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl SourceClient {
    /// Creates a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid or
    /// the underlying client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            client: build_client(config)?,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

impl Fetcher for SourceClient {
    async fn fetch(&self, query: &str, endpoint: &str) -> Result<String, SearchError> {
        let url = build_url(endpoint, query);

        let mut response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Upstream(status.as_u16()));
        }

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SearchError::Network(format!("response read failed: {e}")))?
        {
            let remaining = self.max_body_bytes - body.len();
            if chunk.len() > remaining {
                body.extend_from_slice(&chunk[..remaining]);
                tracing::debug!(
                    limit = self.max_body_bytes,
                    "response body truncated at size cap"
                );
                break;
            }
            body.extend_from_slice(&chunk);
        }

        tracing::trace!(bytes = body.len(), "provider response received");

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
