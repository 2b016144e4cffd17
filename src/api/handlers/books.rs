//! Handler for book catalog search.

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::api::dto::book::BookSearchParams;
use crate::error::AppError;
use crate::infrastructure::catalog::BookResult;
use crate::state::AppState;

/// Searches the book catalog, e.g. to pick a club's book and cover.
///
/// # Endpoint
///
/// `GET /api/books/search?q=piranesi&limit=5`
///
/// # Query Parameters
///
/// - `q`: search text, 1-200 characters
/// - `limit` (optional): maximum results, 1-50 (default: 10)
///
/// # Errors
///
/// - 400 for invalid parameters
/// - 502 when the catalog is unreachable
pub async fn search_books_handler(
    State(state): State<AppState>,
    Query(params): Query<BookSearchParams>,
) -> Result<Json<Vec<BookResult>>, AppError> {
    params.validate()?;

    let books = state.book_service.search(&params.q, params.limit()).await?;
    Ok(Json(books))
}

#[cfg(test)]
mod tests {
    use crate::api::handlers::test_support::{TOKEN, TestMocks};
    use crate::infrastructure::catalog::{BookResult, CatalogError};
    use axum::http::StatusCode;
    use serde_json::Value;

    #[tokio::test]
    async fn test_search_books() {
        let mut mocks = TestMocks::new().authenticated_as(2);
        mocks.cache.expect_get().returning(|_| Ok(None));
        mocks.cache.expect_set().returning(|_, _, _| Ok(()));
        mocks
            .catalog
            .expect_search()
            .withf(|q, limit| q == "piranesi" && *limit == 10)
            .returning(|_, _| {
                Ok(vec![BookResult {
                    title: "Piranesi".to_string(),
                    authors: vec!["Susanna Clarke".to_string()],
                    first_publish_year: Some(2020),
                    cover_url: None,
                    work_key: Some("/works/OL20893680W".to_string()),
                }])
            });

        let response = mocks
            .server()
            .get("/api/books/search")
            .add_query_param("q", "piranesi")
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body[0]["title"], "Piranesi");
        assert_eq!(body[0]["first_publish_year"], 2020);
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let mocks = TestMocks::new().authenticated_as(2);

        let response = mocks
            .server()
            .get("/api/books/search")
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_search_limit_bounds() {
        let mocks = TestMocks::new().authenticated_as(2);

        let response = mocks
            .server()
            .get("/api/books/search")
            .add_query_param("q", "dune")
            .add_query_param("limit", 51)
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let mut mocks = TestMocks::new().authenticated_as(2);
        mocks.cache.expect_get().returning(|_| Ok(None));
        mocks
            .catalog
            .expect_search()
            .returning(|_, _| Err(CatalogError::Status(500)));

        let response = mocks
            .server()
            .get("/api/books/search")
            .add_query_param("q", "dune")
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "upstream_error");
    }
}
