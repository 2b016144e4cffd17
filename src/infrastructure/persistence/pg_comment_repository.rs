//! PostgreSQL implementation of comment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Comment, NewComment};
use crate::domain::repositories::CommentRepository;
use crate::error::AppError;

/// PostgreSQL repository for discussion comments.
pub struct PgCommentRepository {
    pool: Arc<PgPool>,
}

impl PgCommentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    discussion_id: i64,
    club_id: i64,
    author_id: i64,
    author_name: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(r: CommentRow) -> Self {
        Comment {
            id: r.id,
            discussion_id: r.discussion_id,
            club_id: r.club_id,
            author_id: r.author_id,
            author_name: r.author_name,
            body: r.body,
            created_at: r.created_at,
        }
    }
}

const COMMENT_SELECT: &str = r#"
    SELECT c.id, c.discussion_id, ch.club_id, c.author_id, u.display_name AS author_name,
           c.body, c.created_at
    FROM comments c
    JOIN discussions d ON d.id = c.discussion_id
    JOIN chapters ch ON ch.id = d.chapter_id
    JOIN users u ON u.id = c.author_id
"#;

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO comments (discussion_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(new_comment.discussion_id)
        .bind(new_comment.author_id)
        .bind(&new_comment.body)
        .fetch_one(self.pool.as_ref())
        .await?;

        let row = sqlx::query_as::<_, CommentRow>(&format!("{COMMENT_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(&format!("{COMMENT_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Comment::from))
    }

    async fn list_by_discussion(
        &self,
        discussion_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "{COMMENT_SELECT} WHERE c.discussion_id = $1 \
             ORDER BY c.created_at, c.id LIMIT $2 OFFSET $3"
        ))
        .bind(discussion_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
