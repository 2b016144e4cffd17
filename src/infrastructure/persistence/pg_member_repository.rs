//! PostgreSQL implementation of membership repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Member, MemberRole};
use crate::domain::repositories::MemberRepository;
use crate::error::AppError;

/// PostgreSQL repository for club memberships.
pub struct PgMemberRepository {
    pool: Arc<PgPool>,
}

impl PgMemberRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    club_id: i64,
    user_id: i64,
    username: String,
    display_name: String,
    role: String,
    joined_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(r: MemberRow) -> Self {
        Member {
            club_id: r.club_id,
            user_id: r.user_id,
            username: r.username,
            display_name: r.display_name,
            role: MemberRole::parse(&r.role),
            joined_at: r.joined_at,
        }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find(&self, club_id: i64, user_id: i64) -> Result<Option<Member>, AppError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT m.club_id, m.user_id, u.username, u.display_name, m.role, m.joined_at
            FROM members m
            JOIN users u ON u.id = m.user_id
            WHERE m.club_id = $1 AND m.user_id = $2
            "#,
        )
        .bind(club_id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Member::from))
    }

    async fn list(&self, club_id: i64) -> Result<Vec<Member>, AppError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT m.club_id, m.user_id, u.username, u.display_name, m.role, m.joined_at
            FROM members m
            JOIN users u ON u.id = m.user_id
            WHERE m.club_id = $1
            ORDER BY (m.role = 'owner') DESC, m.joined_at, m.user_id
            "#,
        )
        .bind(club_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn add(&self, club_id: i64, user_id: i64, role: MemberRole) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO members (club_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (club_id, user_id) DO NOTHING
            "#,
        )
        .bind(club_id)
        .bind(user_id)
        .bind(role.as_str())
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, club_id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM progress p
            USING chapters c
            WHERE p.chapter_id = c.id AND c.club_id = $1 AND p.user_id = $2
            "#,
        )
        .bind(club_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM members WHERE club_id = $1 AND user_id = $2")
            .bind(club_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
