//! PostgreSQL implementation of discussion repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Discussion, NewDiscussion};
use crate::domain::repositories::DiscussionRepository;
use crate::error::AppError;

/// PostgreSQL repository for chapter discussions.
pub struct PgDiscussionRepository {
    pool: Arc<PgPool>,
}

impl PgDiscussionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DiscussionRow {
    id: i64,
    chapter_id: i64,
    club_id: i64,
    author_id: i64,
    author_name: String,
    title: String,
    body: String,
    comment_count: i64,
    created_at: DateTime<Utc>,
}

impl From<DiscussionRow> for Discussion {
    fn from(r: DiscussionRow) -> Self {
        Discussion {
            id: r.id,
            chapter_id: r.chapter_id,
            club_id: r.club_id,
            author_id: r.author_id,
            author_name: r.author_name,
            title: r.title,
            body: r.body,
            comment_count: r.comment_count,
            created_at: r.created_at,
        }
    }
}

const DISCUSSION_SELECT: &str = r#"
    SELECT d.id, d.chapter_id, ch.club_id, d.author_id, u.display_name AS author_name,
           d.title, d.body,
           (SELECT COUNT(*) FROM comments c WHERE c.discussion_id = d.id) AS comment_count,
           d.created_at
    FROM discussions d
    JOIN chapters ch ON ch.id = d.chapter_id
    JOIN users u ON u.id = d.author_id
"#;

#[async_trait]
impl DiscussionRepository for PgDiscussionRepository {
    async fn create(&self, new_discussion: NewDiscussion) -> Result<Discussion, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO discussions (chapter_id, author_id, title, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new_discussion.chapter_id)
        .bind(new_discussion.author_id)
        .bind(&new_discussion.title)
        .bind(&new_discussion.body)
        .fetch_one(self.pool.as_ref())
        .await?;

        let row =
            sqlx::query_as::<_, DiscussionRow>(&format!("{DISCUSSION_SELECT} WHERE d.id = $1"))
                .bind(id)
                .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Discussion>, AppError> {
        let row =
            sqlx::query_as::<_, DiscussionRow>(&format!("{DISCUSSION_SELECT} WHERE d.id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Discussion::from))
    }

    async fn list_by_chapter(&self, chapter_id: i64) -> Result<Vec<Discussion>, AppError> {
        let rows = sqlx::query_as::<_, DiscussionRow>(&format!(
            "{DISCUSSION_SELECT} WHERE d.chapter_id = $1 ORDER BY d.created_at DESC, d.id DESC"
        ))
        .bind(chapter_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Discussion::from).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM discussions WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
