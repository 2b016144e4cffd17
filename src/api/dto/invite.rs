//! DTOs for club invites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::invite_service::MAX_INVITE_TTL_HOURS;
use crate::domain::entities::ClubInvite;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateInviteRequest {
    /// Overrides the configured invite lifetime.
    #[validate(range(min = 1, max = MAX_INVITE_TTL_HOURS, message = "must be between 1 and 8760"))]
    pub ttl_hours: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub id: i64,
    pub club_id: i64,
    pub code: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub uses: i32,
    pub usable: bool,
}

impl From<ClubInvite> for InviteResponse {
    fn from(invite: ClubInvite) -> Self {
        let usable = invite.is_usable();

        Self {
            id: invite.id,
            club_id: invite.club_id,
            code: invite.code,
            created_by: invite.created_by,
            created_at: invite.created_at,
            expires_at: invite.expires_at,
            revoked_at: invite.revoked_at,
            uses: invite.uses,
            usable,
        }
    }
}
