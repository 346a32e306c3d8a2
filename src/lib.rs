//! catalog-search - debounced product search for the terminal
//!
//! Typing in the search box waits for a quiet period, queries a remote
//! product catalog, and lists the hits with the query highlighted inline.
//!
//! # Features
//!
//! - **Debounced queries**: rapid edits collapse into one request for the
//!   final value
//! - **Latest request wins**: responses to superseded queries are dropped
//! - **Inline highlighting**: case-insensitive, literal matching of the query
//!   in titles and descriptions
//! - **One-shot mode**: the same flow from the command line, as text or JSON
//!
//! # Example
//!
//! ```no_run
//! use catalog_search::{HttpCatalog, SearchController};
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//!
//! fn main() -> catalog_search::Result<()> {
//!     let catalog = Arc::new(HttpCatalog::new("https://dummyjson.com/products/search")?);
//!     let mut controller = SearchController::new(catalog, Duration::from_millis(1000), Instant::now());
//!
//!     controller.set_query("phone", Instant::now());
//!     controller.flush();
//!     controller.wait_idle(Duration::from_secs(30));
//!
//!     for product in controller.results() {
//!         println!("{}: {}", product.id, product.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod tui;

// Re-export main types
pub use catalog::{Catalog, HttpCatalog, Product, SearchResponse};
pub use config::{AppConfig, ConfigOverrides};
pub use controller::SearchController;
pub use debounce::Debounce;
pub use error::{Result, SearchError};
pub use highlight::{highlight, Highlighter, Segment};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
