//! PostgreSQL implementation of invite repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ClubInvite, NewInvite};
use crate::domain::repositories::InviteRepository;
use crate::error::AppError;

/// PostgreSQL repository for club invites.
pub struct PgInviteRepository {
    pool: Arc<PgPool>,
}

impl PgInviteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct InviteRow {
    id: i64,
    club_id: i64,
    code: String,
    created_by: i64,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    revoked_at: Option<DateTime<Utc>>,
    uses: i32,
}

impl From<InviteRow> for ClubInvite {
    fn from(r: InviteRow) -> Self {
        ClubInvite {
            id: r.id,
            club_id: r.club_id,
            code: r.code,
            created_by: r.created_by,
            created_at: r.created_at,
            expires_at: r.expires_at,
            revoked_at: r.revoked_at,
            uses: r.uses,
        }
    }
}

const INVITE_COLUMNS: &str =
    "id, club_id, code, created_by, created_at, expires_at, revoked_at, uses";

#[async_trait]
impl InviteRepository for PgInviteRepository {
    async fn create(&self, new_invite: NewInvite) -> Result<ClubInvite, AppError> {
        let row = sqlx::query_as::<_, InviteRow>(&format!(
            "INSERT INTO club_invites (club_id, code, created_by, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING {INVITE_COLUMNS}"
        ))
        .bind(new_invite.club_id)
        .bind(&new_invite.code)
        .bind(new_invite.created_by)
        .bind(new_invite.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ClubInvite>, AppError> {
        let row = sqlx::query_as::<_, InviteRow>(&format!(
            "SELECT {INVITE_COLUMNS} FROM club_invites WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ClubInvite::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ClubInvite>, AppError> {
        let row = sqlx::query_as::<_, InviteRow>(&format!(
            "SELECT {INVITE_COLUMNS} FROM club_invites WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ClubInvite::from))
    }

    async fn list_by_club(&self, club_id: i64) -> Result<Vec<ClubInvite>, AppError> {
        let rows = sqlx::query_as::<_, InviteRow>(&format!(
            "SELECT {INVITE_COLUMNS} FROM club_invites \
             WHERE club_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(club_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ClubInvite::from).collect())
    }

    async fn revoke(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE club_invites SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_uses(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE club_invites SET uses = uses + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
