//! Error types for the trawl-search crate.
//!
//! Only [`SearchError::InvalidQuery`] ever reaches a caller of
//! [`crate::Aggregator::aggregate`]. Network and upstream failures are
//! absorbed per source, and configuration errors surface once, when the
//! aggregator is built.

/// Errors that can occur while configuring or running a fan-out search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was the empty string.
    #[error("invalid query: query must not be empty")]
    InvalidQuery,

    /// Transport-level failure talking to a provider (DNS, connect,
    /// timeout, truncated body).
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status code.
    #[error("upstream error: provider returned HTTP {0}")]
    Upstream(u16),

    /// Invalid configuration: a bad source rule, endpoint template,
    /// extraction pattern or client limit. Fatal at startup.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for trawl-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
