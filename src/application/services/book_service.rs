//! Book search backed by an external catalog and the cache.

use std::sync::Arc;

use serde_json::json;

use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::catalog::{BookCatalog, BookResult};

pub struct BookService {
    catalog: Arc<dyn BookCatalog>,
    cache: Arc<dyn CacheService>,
    cache_ttl_seconds: u64,
}

impl BookService {
    pub fn new(
        catalog: Arc<dyn BookCatalog>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            catalog,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Searches the catalog, serving repeated queries from the cache.
    ///
    /// Cache failures are logged and fall through to a live lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the catalog cannot be reached or
    /// answers with an error after retries.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<BookResult>, AppError> {
        let query = query.trim();
        let key = cache_key(query, limit);

        match self.cache.get(&key).await {
            Ok(Some(cached)) => match serde_json::from_str::<Vec<BookResult>>(&cached) {
                Ok(books) => {
                    metrics::counter!("book_search_cache_hits_total").increment(1);
                    tracing::debug!(key, "Book search cache hit");
                    return Ok(books);
                }
                Err(e) => tracing::warn!(key, error = %e, "Discarding malformed cached search"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(key, error = %e, "Cache lookup failed"),
        }

        let books = self.catalog.search(query, limit).await.map_err(|e| {
            tracing::warn!(query, error = %e, "Book catalog search failed");
            AppError::upstream(
                "Book catalog is unavailable",
                json!({ "reason": e.to_string() }),
            )
        })?;

        match serde_json::to_string(&books) {
            Ok(payload) => {
                if let Err(e) = self
                    .cache
                    .set(&key, &payload, Some(self.cache_ttl_seconds))
                    .await
                {
                    tracing::warn!(key, error = %e, "Failed to cache search results");
                }
            }
            Err(e) => tracing::warn!(key, error = %e, "Failed to serialize search results"),
        }

        Ok(books)
    }
}

/// Queries differing only in case or surrounding whitespace share an entry.
fn cache_key(query: &str, limit: usize) -> String {
    format!("books:{limit}:{}", query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::{CacheError, MockCacheService};
    use crate::infrastructure::catalog::{CatalogError, MockBookCatalog};

    fn dune() -> BookResult {
        BookResult {
            title: "Dune".to_string(),
            authors: vec!["Frank Herbert".to_string()],
            first_publish_year: Some(1965),
            cover_url: Some("https://covers.openlibrary.org/b/id/11481354-L.jpg".to_string()),
            work_key: Some("/works/OL893415W".to_string()),
        }
    }

    #[test]
    fn test_cache_key_is_case_insensitive() {
        assert_eq!(cache_key("Dune", 10), cache_key("dune", 10));
        assert_ne!(cache_key("dune", 10), cache_key("dune", 5));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_catalog() {
        let mut cache = MockCacheService::new();
        let payload = serde_json::to_string(&vec![dune()]).unwrap();
        cache
            .expect_get()
            .withf(|key| key == "books:10:dune")
            .returning(move |_| Ok(Some(payload.clone())));
        cache.expect_set().times(0);

        let mut catalog = MockBookCatalog::new();
        catalog.expect_search().times(0);

        let svc = BookService::new(Arc::new(catalog), Arc::new(cache), 60);
        let books = svc.search("  Dune ", 10).await.unwrap();
        assert_eq!(books, vec![dune()]);
    }

    #[tokio::test]
    async fn test_cache_miss_fetches_and_stores() {
        let mut cache = MockCacheService::new();
        cache.expect_get().returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(|key, _, ttl| key == "books:5:dune" && *ttl == Some(60))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut catalog = MockBookCatalog::new();
        catalog
            .expect_search()
            .withf(|query, limit| query == "Dune" && *limit == 5)
            .times(1)
            .returning(|_, _| Ok(vec![dune()]));

        let svc = BookService::new(Arc::new(catalog), Arc::new(cache), 60);
        assert_eq!(svc.search("Dune", 5).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cache_failure_falls_back_to_catalog() {
        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .returning(|_| Err(CacheError::ConnectionError("down".to_string())));
        cache
            .expect_set()
            .returning(|_, _, _| Err(CacheError::ConnectionError("down".to_string())));

        let mut catalog = MockBookCatalog::new();
        catalog.expect_search().returning(|_, _| Ok(vec![dune()]));

        let svc = BookService::new(Arc::new(catalog), Arc::new(cache), 60);
        assert!(svc.search("dune", 10).await.is_ok());
    }

    #[tokio::test]
    async fn test_catalog_failure_is_upstream_error() {
        let mut cache = MockCacheService::new();
        cache.expect_get().returning(|_| Ok(None));
        cache.expect_set().times(0);

        let mut catalog = MockBookCatalog::new();
        catalog
            .expect_search()
            .returning(|_, _| Err(CatalogError::Status(503)));

        let svc = BookService::new(Arc::new(catalog), Arc::new(cache), 60);
        let err = svc.search("dune", 10).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream { .. }));
    }
}
