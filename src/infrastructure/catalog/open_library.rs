//! Open Library search client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use url::Url;

use super::{BookCatalog, BookResult, CatalogError};

const COVERS_BASE_URL: &str = "https://covers.openlibrary.org/b/id";
const SEARCH_FIELDS: &str = "key,title,author_name,first_publish_year,cover_i";
const MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    key: Option<String>,
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    first_publish_year: Option<i32>,
    cover_i: Option<i64>,
}

/// HTTP client for `https://openlibrary.org/search.json`.
///
/// Transient failures (connect errors, timeouts, 429, 5xx) are retried with
/// jittered exponential backoff, up to three attempts in total.
pub struct OpenLibraryClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenLibraryClient {
    /// Creates a client against `base_url` (normally `https://openlibrary.org`).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Request`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("reading-club/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, query: &str, limit: usize) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&format!("{}/search.json", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string())
            .append_pair("fields", SEARCH_FIELDS);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<BookResult>, CatalogError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_search_response(&body)
    }
}

#[async_trait]
impl BookCatalog for OpenLibraryClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<BookResult>, CatalogError> {
        let url = self.search_url(query, limit)?;

        // 200ms, 400ms, ... between attempts.
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(100)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(MAX_ATTEMPTS - 1);

        let mut results = RetryIf::spawn(
            strategy,
            || self.fetch(url.clone()),
            |e: &CatalogError| {
                let retry = e.is_transient();
                if retry {
                    tracing::warn!(error = %e, "Open Library request failed, retrying");
                }
                retry
            },
        )
        .await?;

        results.truncate(limit);
        Ok(results)
    }
}

/// Parses an Open Library `search.json` body into book results.
///
/// Documents without a title are skipped.
pub fn parse_search_response(body: &str) -> Result<Vec<BookResult>, CatalogError> {
    let response: SearchResponse = serde_json::from_str(body)?;

    Ok(response
        .docs
        .into_iter()
        .filter_map(|doc| {
            let title = doc.title?.trim().to_string();
            if title.is_empty() {
                return None;
            }

            Some(BookResult {
                title,
                authors: doc.author_name,
                first_publish_year: doc.first_publish_year,
                cover_url: doc
                    .cover_i
                    .filter(|id| *id > 0)
                    .map(|id| format!("{COVERS_BASE_URL}/{id}-L.jpg")),
                work_key: doc.key,
            })
        })
        .collect())
}
