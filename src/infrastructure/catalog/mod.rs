//! Book catalog integrations.
//!
//! - [`BookCatalog`] - search abstraction consumed by
//!   [`crate::application::services::BookService`]
//! - [`OpenLibraryClient`] - Open Library `search.json` implementation

mod open_library;

pub use open_library::{OpenLibraryClient, parse_search_response};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A book returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResult {
    pub title: String,
    pub authors: Vec<String>,
    pub first_publish_year: Option<i32>,
    pub cover_url: Option<String>,
    /// Catalog identifier, e.g. `/works/OL893415W`.
    pub work_key: Option<String>,
}

/// Errors returned by catalog clients.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("catalog returned status {0}")]
    Status(u16),
    #[error("invalid catalog url: {0}")]
    Url(#[from] url::ParseError),
    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// Returns true for failures worth retrying (network errors, 5xx, 429).
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            CatalogError::Status(status) => *status == 429 || *status >= 500,
            CatalogError::Url(_) | CatalogError::Decode(_) => false,
        }
    }
}

/// Searches an external book catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCatalog: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<BookResult>, CatalogError>;
}
