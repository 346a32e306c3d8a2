//! Remote product catalog
//!
//! `Catalog` is the seam the controller dispatches through; `HttpCatalog`
//! talks to the product-search endpoint.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One search hit, taken verbatim from the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
}

/// Body of a search response. Fields beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl SearchResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Source of search results
pub trait Catalog: Send + Sync {
    fn search(&self, query: &str) -> Result<SearchResponse>;
}

/// Catalog backed by an HTTP GET endpoint
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpCatalog {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("catalog-search/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Use a preconfigured client (timeouts, proxies)
    pub fn with_client(client: reqwest::blocking::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL for `query`
    pub fn search_url(&self, query: &str) -> String {
        let sep = if self.endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}q={}", self.endpoint, sep, urlencoding::encode(query))
    }
}

impl Catalog for HttpCatalog {
    fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = self.search_url(query);
        let response = self.client.get(&url).send()?;
        let status = response.status();
        let body = response.text()?;
        tracing::debug!(target: "catalog", %url, %status, bytes = body.len(), "response received");
        SearchResponse::from_json(&body)
    }
}
