//! Trait for the component that fetches a provider's raw response body.
//!
//! [`crate::http::SourceClient`] is the real implementation. Tests and
//! embedders can supply their own to drive [`crate::Aggregator`] without
//! network access.

use crate::error::SearchError;
use std::future::Future;

/// Fetches one provider response body for a query.
///
/// Implementations must be `Send + Sync`: one fetcher is shared by every
/// concurrently running source task.
pub trait Fetcher: Send + Sync {
    /// Substitutes the URL-escaped `query` into `endpoint` and returns the
    /// response body.
    ///
    /// # Errors
    ///
    /// [`SearchError::Network`] for transport failures,
    /// [`SearchError::Upstream`] for non-success status codes.
    fn fetch(
        &self,
        query: &str,
        endpoint: &str,
    ) -> impl Future<Output = Result<String, SearchError>> + Send;
}
