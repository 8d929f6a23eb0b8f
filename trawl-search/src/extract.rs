//! Pattern-based result extraction from provider response bodies.
//!
//! Extraction is a best-effort regular-expression match over raw HTML, not
//! a parse. A body whose markup no longer matches yields fewer (or zero)
//! results, never an error.

use crate::error::SearchError;
use crate::types::ResultItem;
use regex::Regex;

/// Maximum number of results kept per source.
pub const MAX_RESULTS_PER_SOURCE: usize = 5;

/// Matches a single markup tag: `<` up to the next `>`.
const TAG_PATTERN: &str = "<[^>]*>";

/// A compiled extraction pattern.
///
/// The pattern must have at least two capture groups: group 1 is the
/// link target, group 2 the title.
#[derive(Debug, Clone)]
pub struct Extractor {
    pattern: Regex,
    tags: Regex,
}

impl Extractor {
    /// Compiles `pattern` into an extractor.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the pattern does not compile or
    /// has fewer than two capture groups.
    pub fn new(pattern: &str) -> Result<Self, SearchError> {
        let compiled = Regex::new(pattern)
            .map_err(|e| SearchError::Config(format!("invalid extraction pattern: {e}")))?;
        // captures_len() counts the implicit whole-match group.
        if compiled.captures_len() < 3 {
            return Err(SearchError::Config(format!(
                "extraction pattern must capture a link group and a title group: {pattern}"
            )));
        }
        let tags = Regex::new(TAG_PATTERN)
            .map_err(|e| SearchError::Config(format!("invalid tag pattern: {e}")))?;
        Ok(Self {
            pattern: compiled,
            tags,
        })
    }

    /// Returns the source text of the extraction pattern.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Extracts up to [`MAX_RESULTS_PER_SOURCE`] results from `body`, in
    /// document order.
    ///
    /// Matches where the link or title group did not participate are
    /// skipped. Never fails: a body with no matches yields an empty list.
    pub fn extract(&self, body: &str) -> Vec<ResultItem> {
        self.pattern
            .captures_iter(body)
            .filter_map(|caps| {
                let url = caps.get(1)?.as_str();
                let title = caps.get(2)?.as_str();
                Some(ResultItem {
                    title: self.strip_tags(title),
                    url: url.to_owned(),
                })
            })
            .take(MAX_RESULTS_PER_SOURCE)
            .collect()
    }

    /// Removes every `<...>` tag from `text`. Entities are left as-is.
    pub fn strip_tags(&self, text: &str) -> String {
        self.tags.replace_all(text, "").into_owned()
    }
}
