//! PostgreSQL implementation of club repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Club, ClubPatch, NewClub};
use crate::domain::repositories::ClubRepository;
use crate::error::AppError;

/// PostgreSQL repository for clubs.
///
/// Club creation inserts the club, its chapters and the owner membership in a
/// single transaction. Deletion relies on `ON DELETE CASCADE` foreign keys.
pub struct PgClubRepository {
    pool: Arc<PgPool>,
}

impl PgClubRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClubRow {
    id: i64,
    name: String,
    book_title: String,
    book_author: Option<String>,
    cover_url: Option<String>,
    owner_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClubRow> for Club {
    fn from(r: ClubRow) -> Self {
        Club {
            id: r.id,
            name: r.name,
            book_title: r.book_title,
            book_author: r.book_author,
            cover_url: r.cover_url,
            owner_id: r.owner_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[async_trait]
impl ClubRepository for PgClubRepository {
    async fn create(&self, new_club: NewClub) -> Result<Club, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ClubRow>(
            r#"
            INSERT INTO clubs (name, book_title, book_author, cover_url, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, book_title, book_author, cover_url, owner_id, created_at, updated_at
            "#,
        )
        .bind(&new_club.name)
        .bind(&new_club.book_title)
        .bind(&new_club.book_author)
        .bind(&new_club.cover_url)
        .bind(new_club.owner_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO members (club_id, user_id, role) VALUES ($1, $2, 'owner')")
            .bind(row.id)
            .bind(new_club.owner_id)
            .execute(&mut *tx)
            .await?;

        let positions: Vec<i32> = (1..=new_club.chapters.len() as i32).collect();
        sqlx::query(
            r#"
            INSERT INTO chapters (club_id, position, title)
            SELECT $1, p, t FROM UNNEST($2::int[], $3::text[]) AS c(p, t)
            "#,
        )
        .bind(row.id)
        .bind(&positions)
        .bind(&new_club.chapters)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Club>, AppError> {
        let row = sqlx::query_as::<_, ClubRow>(
            r#"
            SELECT id, name, book_title, book_author, cover_url, owner_id, created_at, updated_at
            FROM clubs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Club::from))
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Club>, AppError> {
        let rows = sqlx::query_as::<_, ClubRow>(
            r#"
            SELECT c.id, c.name, c.book_title, c.book_author, c.cover_url, c.owner_id,
                   c.created_at, c.updated_at
            FROM clubs c
            JOIN members m ON m.club_id = c.id
            WHERE m.user_id = $1
            ORDER BY m.joined_at DESC, c.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Club::from).collect())
    }

    async fn update(&self, id: i64, patch: ClubPatch) -> Result<Club, AppError> {
        // $4/$6 flag whether the nullable columns were provided at all, so
        // "absent" and "set to NULL" stay distinguishable.
        let row = sqlx::query_as::<_, ClubRow>(
            r#"
            UPDATE clubs SET
                name        = COALESCE($2, name),
                book_title  = COALESCE($3, book_title),
                book_author = CASE WHEN $4 THEN $5 ELSE book_author END,
                cover_url   = CASE WHEN $6 THEN $7 ELSE cover_url END,
                updated_at  = NOW()
            WHERE id = $1
            RETURNING id, name, book_title, book_author, cover_url, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.book_title)
        .bind(patch.book_author.is_some())
        .bind(patch.book_author.clone().flatten())
        .bind(patch.cover_url.is_some())
        .bind(patch.cover_url.clone().flatten())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Club::from)
            .ok_or_else(|| AppError::not_found("Club not found", json!({ "club_id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
