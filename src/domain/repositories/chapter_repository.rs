//! Repository trait for chapters and per-member progress records.

use crate::domain::entities::{Chapter, ChapterWithTally, ClubChapterTally};
use crate::domain::progress::ChapterTally;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for chapters and their completion records.
///
/// Tallies are raw counts; statuses are derived in [`crate::domain::progress`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChapterRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Chapter>, AppError>;

    /// Lists a club's chapters in position order with tallies for `viewer_id`.
    async fn list_with_tallies(
        &self,
        club_id: i64,
        viewer_id: i64,
    ) -> Result<Vec<ChapterWithTally>, AppError>;

    /// Tallies for every chapter of every club `user_id` belongs to,
    /// ordered by club and chapter position.
    async fn tallies_for_user(&self, user_id: i64) -> Result<Vec<ClubChapterTally>, AppError>;

    /// Tally of a single chapter for `viewer_id`.
    async fn tally(&self, chapter_id: i64, viewer_id: i64) -> Result<ChapterTally, AppError>;

    /// Marks or unmarks a chapter as completed by a user.
    ///
    /// Idempotent. Returns `Ok(true)` if a record was inserted or removed.
    async fn set_completed(
        &self,
        chapter_id: i64,
        user_id: i64,
        completed: bool,
    ) -> Result<bool, AppError>;
}
