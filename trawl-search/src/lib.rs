//! # trawl-search
//!
//! Fan-out search across several public search providers.
//!
//! A query is sent to every configured source at once. Each source's
//! response body is run through that source's extraction pattern, and the
//! results come back as a [`ResultBundle`] with one slot per source.
//!
//! ## Design
//!
//! - One GET per source per query, all sources in flight together
//! - Extraction is a regular-expression match over raw HTML, kept to the
//!   first five matches in document order
//! - A failing source never fails the query: its slot is just empty
//! - Sources are configured up front ([`SearchConfig`]) and never change
//!   while the aggregator is alive
//!
//! ## Security
//!
//! - Queries are logged only at trace level
//! - Response bodies are capped before extraction

pub mod aggregator;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod http;
pub mod rule;
pub mod source;
pub mod types;

pub use aggregator::Aggregator;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use extract::{Extractor, MAX_RESULTS_PER_SOURCE};
pub use fetcher::Fetcher;
pub use http::SourceClient;
pub use rule::{CompiledRule, SourceRule, QUERY_PLACEHOLDER};
pub use types::{Provider, ResultBundle, ResultItem};

/// Query every source in `config` once and return the bundle.
///
/// Builds a fresh [`Aggregator`] per call. Long-running callers should
/// build one aggregator up front and reuse it.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid, or
/// [`SearchError::InvalidQuery`] if `query` is empty.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> trawl_search::Result<()> {
/// let config = trawl_search::SearchConfig::default();
/// let bundle = trawl_search::search("rust programming", &config).await?;
/// for (source, results) in bundle.iter() {
///     for result in results {
///         println!("[{source}] {}: {}", result.title, result.url);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<ResultBundle> {
    Aggregator::new(config)?.aggregate(query).await
}
