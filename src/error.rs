//! Error types for catalog-search
//!
//! Fetch failures (network, parse) are swallowed by the controller after
//! logging; everything else propagates to `main`.

use thiserror::Error;

/// Main error type for catalog-search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed search response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for catalog-search operations
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Check if this error came from a search request (the UI keeps running)
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, SearchError::Network(_) | SearchError::Parse(_))
    }

    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Network(_) => "network",
            SearchError::Parse(_) => "parse",
            SearchError::Io(_) => "io",
            SearchError::Config(_) => "config",
        }
    }
}
