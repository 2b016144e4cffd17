//! Repository trait for club memberships.

use crate::domain::entities::{Member, MemberRole};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for club memberships.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Finds a user's membership in a club.
    async fn find(&self, club_id: i64, user_id: i64) -> Result<Option<Member>, AppError>;

    /// Lists a club's members, owner first, then by join time.
    async fn list(&self, club_id: i64) -> Result<Vec<Member>, AppError>;

    /// Adds a member.
    ///
    /// Returns `Ok(false)` if the user was already a member.
    async fn add(&self, club_id: i64, user_id: i64, role: MemberRole) -> Result<bool, AppError>;

    /// Removes a member together with their progress in the club.
    ///
    /// Returns `Ok(false)` if the user was not a member.
    async fn remove(&self, club_id: i64, user_id: i64) -> Result<bool, AppError>;
}
