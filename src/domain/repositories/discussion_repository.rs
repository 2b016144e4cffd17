//! Repository trait for chapter discussions.

use crate::domain::entities::{Discussion, NewDiscussion};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscussionRepository: Send + Sync {
    async fn create(&self, new_discussion: NewDiscussion) -> Result<Discussion, AppError>;

    /// Finds a discussion including its club id and comment count.
    async fn find_by_id(&self, id: i64) -> Result<Option<Discussion>, AppError>;

    /// Lists a chapter's discussions, newest first.
    async fn list_by_chapter(&self, chapter_id: i64) -> Result<Vec<Discussion>, AppError>;

    /// Deletes a discussion and its comments. Returns `Ok(false)` if no row matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
