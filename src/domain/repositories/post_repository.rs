//! Repository trait for club posts.

use crate::domain::entities::{NewPost, Post};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Lists a club's posts, newest first.
    async fn list_by_club(
        &self,
        club_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError>;

    async fn count_by_club(&self, club_id: i64) -> Result<i64, AppError>;

    /// Returns `Ok(false)` if no post matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
