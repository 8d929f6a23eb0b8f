//! Core types: extracted result items, builtin providers, and the
//! per-request result bundle.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single result listing extracted from a provider's response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Listing title with embedded markup tags removed.
    pub title: String,
    /// Link target exactly as it appeared in the provider markup.
    pub url: String,
}

/// Providers with a builtin endpoint and extraction pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google: redirect-wrapped links (`/url?q=`) with `<h3>` titles.
    Google,
    /// Bing: `li.b_algo > h2 > a` listings.
    Bing,
    /// Baidu: `h3.t > a` listings.
    Baidu,
}

impl Provider {
    /// Returns the key this provider occupies in a [`ResultBundle`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
            Self::Baidu => "baidu",
        }
    }

    /// Returns the endpoint template, with `{query}` as the single
    /// substitution point.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Google => "https://www.google.com/search?q={query}",
            Self::Bing => "https://www.bing.com/search?q={query}",
            Self::Baidu => "https://www.baidu.com/s?wd={query}",
        }
    }

    /// Returns the extraction pattern tuned to this provider's markup.
    ///
    /// Group 1 captures the link, group 2 the title. These track the
    /// provider's current HTML and break when it changes.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Google => {
                r#"href="/url\?q=([^&]+)&amp;[^"]*"[^>]*>(?:<h3[^>]*>)?(.*?)(?:</h3>)?</a>"#
            }
            Self::Bing => r#"<li class="b_algo"><h2><a href="([^"]+)"[^>]*>(.*?)</a>"#,
            Self::Baidu => r#"<h3 class="t"><a href="([^"]+)"[^>]*>(.*?)</a>"#,
        }
    }

    /// Returns all builtin providers in canonical bundle order.
    pub fn all() -> &'static [Provider] {
        &[Self::Google, Self::Bing, Self::Baidu]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One result list per configured source, in configuration order.
///
/// Every configured source always has a slot. A source that failed or
/// matched nothing holds an empty list; it is never missing. Serializes
/// as a JSON object whose keys follow the configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultBundle {
    slots: Vec<(String, Vec<ResultItem>)>,
}

impl ResultBundle {
    /// Creates a bundle with an empty slot for each source name.
    pub(crate) fn with_sources<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            slots: names
                .into_iter()
                .map(|name| (name.to_owned(), Vec::new()))
                .collect(),
        }
    }

    /// Stores `items` in the slot at position `slot`. Out-of-range slots are ignored.
    pub(crate) fn fill(&mut self, slot: usize, items: Vec<ResultItem>) {
        if let Some((_, existing)) = self.slots.get_mut(slot) {
            *existing = items;
        }
    }

    /// Returns the results for `source`, or `None` if it is not configured.
    pub fn get(&self, source: &str) -> Option<&[ResultItem]> {
        self.slots
            .iter()
            .find(|(name, _)| name == source)
            .map(|(_, items)| items.as_slice())
    }

    /// Source names in bundle order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(name, _)| name.as_str())
    }

    /// `(source, results)` pairs in bundle order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ResultItem])> {
        self.slots
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Number of sources (not results) in the bundle.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no sources are configured.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total number of results across all sources.
    pub fn total_results(&self) -> usize {
        self.slots.iter().map(|(_, items)| items.len()).sum()
    }
}

impl Serialize for ResultBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (name, items) in &self.slots {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}
