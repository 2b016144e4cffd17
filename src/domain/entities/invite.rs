//! Club invite entity.

use chrono::{DateTime, Utc};

/// A shareable code that lets a user join a club.
#[derive(Debug, Clone)]
pub struct ClubInvite {
    pub id: i64,
    pub club_id: i64,
    pub code: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub uses: i32,
}

impl ClubInvite {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Returns true if the invite has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }

    /// Returns true if the invite can still be accepted.
    pub fn is_usable(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}

#[derive(Debug, Clone)]
pub struct NewInvite {
    pub club_id: i64,
    pub code: String,
    pub created_by: i64,
    pub expires_at: Option<DateTime<Utc>>,
}
