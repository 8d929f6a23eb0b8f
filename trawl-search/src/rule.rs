//! Source rules: which provider endpoint to call and how to read its reply.

use crate::error::SearchError;
use crate::extract::Extractor;
use crate::types::Provider;
use serde::{Deserialize, Serialize};

/// Substitution point for the URL-escaped query in an endpoint template.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Static configuration for one source, as written in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRule {
    /// Key of this source in the result bundle.
    pub name: String,
    /// Endpoint URL containing exactly one [`QUERY_PLACEHOLDER`].
    pub endpoint: String,
    /// Extraction pattern; group 1 is the link, group 2 the title.
    pub pattern: String,
}

impl SourceRule {
    /// Creates a rule from its parts. Nothing is checked until [`compile`](Self::compile).
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            pattern: pattern.into(),
        }
    }

    /// The builtin rule for `provider`.
    pub fn builtin(provider: Provider) -> Self {
        Self::new(provider.name(), provider.endpoint(), provider.pattern())
    }

    /// The builtin rules for every [`Provider`], in canonical order.
    pub fn builtins() -> Vec<Self> {
        Provider::all().iter().copied().map(Self::builtin).collect()
    }

    /// Validates the rule and compiles its extraction pattern.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the name is blank, the endpoint
    /// does not hold exactly one placeholder or is not an absolute http(s)
    /// URL, or the pattern is unusable.
    pub fn compile(&self) -> Result<CompiledRule, SearchError> {
        if self.name.trim().is_empty() {
            return Err(SearchError::Config("source name must not be empty".into()));
        }

        let placeholders = self.endpoint.matches(QUERY_PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(SearchError::Config(format!(
                "source {}: endpoint must contain exactly one {QUERY_PLACEHOLDER} placeholder, found {placeholders}",
                self.name
            )));
        }

        let probe = self.endpoint.replace(QUERY_PLACEHOLDER, "probe");
        let parsed = url::Url::parse(&probe).map_err(|e| {
            SearchError::Config(format!("source {}: invalid endpoint: {e}", self.name))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SearchError::Config(format!(
                "source {}: endpoint scheme must be http or https",
                self.name
            )));
        }

        let extractor = Extractor::new(&self.pattern)
            .map_err(|e| SearchError::Config(format!("source {}: {e}", self.name)))?;

        Ok(CompiledRule {
            name: self.name.clone(),
            endpoint: self.endpoint.clone(),
            extractor,
        })
    }
}

/// A validated [`SourceRule`] with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    name: String,
    endpoint: String,
    extractor: Extractor,
}

impl CompiledRule {
    /// Key of this source in the result bundle.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Endpoint template, containing exactly one [`QUERY_PLACEHOLDER`].
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Compiled extraction pattern for this source's response bodies.
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }
}
