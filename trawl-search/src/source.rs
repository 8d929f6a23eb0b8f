//! A single source's fetch-then-extract run.
//!
//! [`SourceTask`] is where per-provider failures stop: whatever goes wrong
//! while fetching, the task logs it and reports an empty list.

use crate::fetcher::Fetcher;
use crate::rule::CompiledRule;
use crate::types::ResultItem;
use std::sync::Arc;

/// Binds one compiled rule to the shared fetcher.
#[derive(Debug)]
pub struct SourceTask<F> {
    rule: CompiledRule,
    fetcher: Arc<F>,
}

impl<F: Fetcher> SourceTask<F> {
    /// Creates a task for `rule` that fetches through `fetcher`.
    pub fn new(rule: CompiledRule, fetcher: Arc<F>) -> Self {
        Self { rule, fetcher }
    }

    /// Name of the source, i.e. its key in the result bundle.
    pub fn name(&self) -> &str {
        self.rule.name()
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetches and extracts results for `query`. Never fails.
    pub async fn run(&self, query: &str) -> Vec<ResultItem> {
        let source = self.rule.name();
        match self.fetcher.fetch(query, self.rule.endpoint()).await {
            Ok(body) => {
                let items = self.rule.extractor().extract(&body);
                tracing::debug!(source, count = items.len(), "source returned results");
                items
            }
            Err(err) => {
                tracing::warn!(source, error = %err, "source query failed");
                Vec::new()
            }
        }
    }
}
