//! Club invite service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;

use super::access::require_member;
use crate::domain::entities::{Club, ClubInvite, MemberRole, NewInvite};
use crate::domain::repositories::{ClubRepository, InviteRepository, MemberRepository};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_code};

/// Longest invite lifetime accepted from callers (one year).
pub const MAX_INVITE_TTL_HOURS: i64 = 24 * 365;

const MAX_CODE_ATTEMPTS: usize = 10;

/// Outcome of accepting an invite.
#[derive(Debug, Clone)]
pub struct AcceptedInvite {
    pub club: Club,
    /// False when the caller was already a member.
    pub joined: bool,
}

pub struct InviteService {
    invites: Arc<dyn InviteRepository>,
    members: Arc<dyn MemberRepository>,
    clubs: Arc<dyn ClubRepository>,
    default_ttl_hours: i64,
}

impl InviteService {
    pub fn new(
        invites: Arc<dyn InviteRepository>,
        members: Arc<dyn MemberRepository>,
        clubs: Arc<dyn ClubRepository>,
        default_ttl_hours: i64,
    ) -> Self {
        Self {
            invites,
            members,
            clubs,
            default_ttl_hours,
        }
    }

    /// Creates an invite to a club the caller belongs to.
    ///
    /// `ttl_hours` overrides the configured default lifetime.
    pub async fn create_invite(
        &self,
        user_id: i64,
        club_id: i64,
        ttl_hours: Option<i64>,
    ) -> Result<ClubInvite, AppError> {
        let ttl_hours = ttl_hours.unwrap_or(self.default_ttl_hours);
        if !(1..=MAX_INVITE_TTL_HOURS).contains(&ttl_hours) {
            return Err(AppError::bad_request(
                format!("ttl_hours must be between 1 and {MAX_INVITE_TTL_HOURS}"),
                json!({ "ttl_hours": ttl_hours }),
            ));
        }

        self.find_club(club_id).await?;
        require_member(self.members.as_ref(), club_id, user_id).await?;

        let code = self.generate_unique_code().await?;
        let invite = self
            .invites
            .create(NewInvite {
                club_id,
                code,
                created_by: user_id,
                expires_at: Some(Utc::now() + Duration::hours(ttl_hours)),
            })
            .await?;

        tracing::info!(club_id, user_id, invite_id = invite.id, "Invite created");
        Ok(invite)
    }

    pub async fn list_invites(
        &self,
        user_id: i64,
        club_id: i64,
    ) -> Result<Vec<ClubInvite>, AppError> {
        self.find_club(club_id).await?;
        require_member(self.members.as_ref(), club_id, user_id).await?;

        self.invites.list_by_club(club_id).await
    }

    /// Revokes an invite. Allowed for the club owner and the invite's creator.
    pub async fn revoke_invite(
        &self,
        user_id: i64,
        club_id: i64,
        invite_id: i64,
    ) -> Result<(), AppError> {
        let invite = self
            .invites
            .find_by_id(invite_id)
            .await?
            .filter(|i| i.club_id == club_id)
            .ok_or_else(|| invite_not_found(json!({ "invite_id": invite_id })))?;

        let member = require_member(self.members.as_ref(), club_id, user_id).await?;
        if !member.is_owner() && invite.created_by != user_id {
            return Err(AppError::forbidden(
                "Only the club owner or the invite creator can revoke it",
                json!({ "invite_id": invite_id }),
            ));
        }

        if self.invites.revoke(invite_id).await? {
            tracing::info!(club_id, user_id, invite_id, "Invite revoked");
        }

        Ok(())
    }

    /// Joins the club behind an invite code.
    ///
    /// Accepting an invite to a club the caller already belongs to succeeds
    /// without changing anything, even when the invite is no longer usable.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for unknown or malformed codes
    /// - [`AppError::Validation`] for expired or revoked invites
    pub async fn accept_invite(
        &self,
        user_id: i64,
        code: &str,
    ) -> Result<AcceptedInvite, AppError> {
        if validate_code(code).is_err() {
            return Err(invite_not_found(json!({ "code": code })));
        }

        let invite = self
            .invites
            .find_by_code(code)
            .await?
            .ok_or_else(|| invite_not_found(json!({ "code": code })))?;

        if self.members.find(invite.club_id, user_id).await?.is_some() {
            let club = self.find_club(invite.club_id).await?;
            return Ok(AcceptedInvite {
                club,
                joined: false,
            });
        }

        if !invite.is_usable() {
            return Err(AppError::bad_request(
                "Invite has expired or been revoked",
                json!({ "code": code }),
            ));
        }

        let club = self.find_club(invite.club_id).await?;

        let joined = self
            .members
            .add(invite.club_id, user_id, MemberRole::Member)
            .await?;

        if joined {
            self.invites.increment_uses(invite.id).await?;
            tracing::info!(
                club_id = club.id,
                user_id,
                invite_id = invite.id,
                "Joined club via invite"
            );
        }

        Ok(AcceptedInvite { club, joined })
    }

    async fn find_club(&self, club_id: i64) -> Result<Club, AppError> {
        self.clubs
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| AppError::not_found("Club not found", json!({ "club_id": club_id })))
    }

    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code()?;

            if self.invites.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique invite code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }
}

fn invite_not_found(details: serde_json::Value) -> AppError {
    AppError::not_found("Invite not found", details)
}
