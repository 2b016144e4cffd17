//! Repository trait for discussion comments.

use crate::domain::entities::{Comment, NewComment};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError>;

    /// Lists a discussion's comments, oldest first.
    async fn list_by_discussion(
        &self,
        discussion_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError>;

    /// Returns `Ok(false)` if no comment matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
