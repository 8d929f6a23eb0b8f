//! Configuration for the trawl service.
//!
//! Loaded from TOML. Every section is optional; a missing `[[sources]]`
//! list means the builtin google/bing/baidu rules.

use crate::error::{Result, TrawlError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trawl_search::config::{DEFAULT_MAX_BODY_BYTES, DEFAULT_USER_AGENT};
use trawl_search::{SearchConfig, SourceRule};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrawlConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Outbound provider request settings.
    pub search: SearchSettings,
    /// Sources to query, in response order.
    pub sources: Vec<SourceRule>,
}

impl Default for TrawlConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            search: SearchSettings::default(),
            sources: SourceRule::builtins(),
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory holding `index.html` and the front-end assets.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Outbound request configuration shared by every source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Per-request deadline in seconds.
    pub timeout_seconds: u64,
    /// User-Agent header sent to providers.
    pub user_agent: String,
    /// Cap on bytes read from one provider response.
    pub max_body_bytes: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 8,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl TrawlConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TrawlError::Config(e.to_string()))
    }

    /// Load `path` if given, else the default path if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let default_path = Self::default_config_path();
        if default_path.is_file() {
            tracing::info!(path = %default_path.display(), "loading config");
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path: `~/.config/trawl/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("trawl").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("trawl")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/trawl-config/config.toml")
        }
    }

    /// The search core's view of this configuration.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            sources: self.sources.clone(),
            timeout_seconds: self.search.timeout_seconds,
            user_agent: self.search.user_agent.clone(),
            max_body_bytes: self.search.max_body_bytes,
        }
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
