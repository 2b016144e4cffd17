//! DTOs for book search.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// `GET /api/books/search?q=dune&limit=5`
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct BookSearchParams {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub q: String,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 50, message = "must be between 1 and 50"))]
    pub limit: Option<usize>,
}

impl BookSearchParams {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }
}
