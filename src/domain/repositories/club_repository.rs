//! Repository trait for clubs.

use crate::domain::entities::{Club, ClubPatch, NewClub};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for clubs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClubRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClubRepository: Send + Sync {
    /// Creates a club, its chapters and the owner's membership atomically.
    async fn create(&self, new_club: NewClub) -> Result<Club, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Club>, AppError>;

    /// Lists the clubs a user belongs to, most recently joined first.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Club>, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the club does not exist.
    async fn update(&self, id: i64, patch: ClubPatch) -> Result<Club, AppError>;

    /// Deletes a club and everything scoped to it.
    ///
    /// Returns `Ok(false)` if no club matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
