//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] carries the source rules and the outbound client
//! limits. It is handed to [`crate::Aggregator::new`] at construction time
//! and never changes afterwards.

use crate::error::SearchError;
use crate::rule::SourceRule;

/// Default User-Agent. Several providers reject empty or library agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Default cap on bytes read from a single provider response.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Configuration for a fan-out search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Sources to query, in bundle order.
    pub sources: Vec<SourceRule>,
    /// Per-request deadline in seconds, covering connect, send and body read.
    pub timeout_seconds: u64,
    /// User-Agent header sent with every provider request.
    pub user_agent: String,
    /// Bytes past this limit are discarded before extraction.
    pub max_body_bytes: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources: SourceRule::builtins(),
            timeout_seconds: 8,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl SearchConfig {
    /// Validates the client limits and that at least one source is configured.
    ///
    /// Individual source rules are checked when they are compiled.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(SearchError::Config(
                "max_body_bytes must be greater than 0".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user_agent must not be empty".into()));
        }
        if self.sources.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be configured".into(),
            ));
        }
        Ok(())
    }
}
