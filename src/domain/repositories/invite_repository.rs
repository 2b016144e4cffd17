//! Repository trait for club invites.

use crate::domain::entities::{ClubInvite, NewInvite};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Creates an invite.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already in use.
    async fn create(&self, new_invite: NewInvite) -> Result<ClubInvite, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ClubInvite>, AppError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<ClubInvite>, AppError>;

    /// Lists a club's invites, newest first, including revoked ones.
    async fn list_by_club(&self, club_id: i64) -> Result<Vec<ClubInvite>, AppError>;

    /// Sets `revoked_at`. Returns `Ok(false)` if missing or already revoked.
    async fn revoke(&self, id: i64) -> Result<bool, AppError>;

    async fn increment_uses(&self, id: i64) -> Result<(), AppError>;
}
