//! Application configuration
//!
//! Loaded from an optional JSON file, then overridden by CLI flags.

use crate::error::{Result, SearchError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Product search endpoint queried when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "https://dummyjson.com/products/search";

/// Quiet period before a query is sent
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Longest accepted quiet period (one hour)
pub const MAX_DEBOUNCE_MS: u64 = 3_600_000;

/// Application configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Search endpoint; the query is appended as `?q=`
    pub endpoint: String,
    /// Debounce delay in milliseconds
    pub debounce_ms: u64,
    /// Log file path (default: next to the executable)
    pub log_file: Option<PathBuf>,
    /// tracing filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Placeholder shown in the empty input
    pub placeholder: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            log_file: None,
            log_filter: "info".to_string(),
            placeholder: "Search...".to_string(),
        }
    }
}

/// Values supplied on the command line; `None` keeps the file/default value
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub debounce_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&text)
            .map_err(|e| SearchError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from `path` if given, otherwise start from defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(ms) = overrides.debounce_ms {
            self.debounce_ms = ms;
        }
        if overrides.log_file.is_some() {
            self.log_file = overrides.log_file;
        }
        self
    }

    /// Check the endpoint is an absolute http(s) URL and the delay is at
    /// most [`MAX_DEBOUNCE_MS`]
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(SearchError::Config(format!(
                "debounce_ms {} exceeds the maximum of {}",
                self.debounce_ms, MAX_DEBOUNCE_MS
            )));
        }

        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| SearchError::Config(format!("endpoint '{}': {}", self.endpoint, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(SearchError::Config(format!(
                "endpoint '{}': unsupported scheme '{}'",
                self.endpoint, other
            ))),
        }
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
