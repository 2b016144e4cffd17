//! PostgreSQL implementation of chapter and progress repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Chapter, ChapterWithTally, ClubChapterTally};
use crate::domain::progress::ChapterTally;
use crate::domain::repositories::ChapterRepository;
use crate::error::AppError;

/// PostgreSQL repository for chapters and completion records.
///
/// Tallies count only progress rows of current members, so a member who left
/// does not keep a chapter from reaching `all_complete`.
pub struct PgChapterRepository {
    pool: Arc<PgPool>,
}

impl PgChapterRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ChapterRow {
    id: i64,
    club_id: i64,
    position: i32,
    title: String,
}

impl From<ChapterRow> for Chapter {
    fn from(r: ChapterRow) -> Self {
        Chapter {
            id: r.id,
            club_id: r.club_id,
            position: r.position,
            title: r.title,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TalliedChapterRow {
    id: i64,
    club_id: i64,
    position: i32,
    title: String,
    member_count: i64,
    completed_count: i64,
    viewer_completed: bool,
}

#[derive(sqlx::FromRow)]
struct ClubTallyRow {
    club_id: i64,
    position: i32,
    member_count: i64,
    completed_count: i64,
    viewer_completed: bool,
}

#[derive(sqlx::FromRow)]
struct TallyRow {
    member_count: i64,
    completed_count: i64,
    viewer_completed: bool,
}

#[async_trait]
impl ChapterRepository for PgChapterRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Chapter>, AppError> {
        let row = sqlx::query_as::<_, ChapterRow>(
            "SELECT id, club_id, position, title FROM chapters WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Chapter::from))
    }

    async fn list_with_tallies(
        &self,
        club_id: i64,
        viewer_id: i64,
    ) -> Result<Vec<ChapterWithTally>, AppError> {
        let rows = sqlx::query_as::<_, TalliedChapterRow>(
            r#"
            SELECT
                ch.id,
                ch.club_id,
                ch.position,
                ch.title,
                (SELECT COUNT(*) FROM members m WHERE m.club_id = ch.club_id) AS member_count,
                (SELECT COUNT(*) FROM progress p
                   JOIN members m ON m.user_id = p.user_id AND m.club_id = ch.club_id
                  WHERE p.chapter_id = ch.id) AS completed_count,
                EXISTS (SELECT 1 FROM progress p
                         WHERE p.chapter_id = ch.id AND p.user_id = $2) AS viewer_completed
            FROM chapters ch
            WHERE ch.club_id = $1
            ORDER BY ch.position
            "#,
        )
        .bind(club_id)
        .bind(viewer_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ChapterWithTally {
                tally: ChapterTally::new(r.member_count, r.completed_count, r.viewer_completed),
                chapter: Chapter {
                    id: r.id,
                    club_id: r.club_id,
                    position: r.position,
                    title: r.title,
                },
            })
            .collect())
    }

    async fn tallies_for_user(&self, user_id: i64) -> Result<Vec<ClubChapterTally>, AppError> {
        let rows = sqlx::query_as::<_, ClubTallyRow>(
            r#"
            SELECT
                ch.club_id,
                ch.position,
                (SELECT COUNT(*) FROM members m WHERE m.club_id = ch.club_id) AS member_count,
                (SELECT COUNT(*) FROM progress p
                   JOIN members m ON m.user_id = p.user_id AND m.club_id = ch.club_id
                  WHERE p.chapter_id = ch.id) AS completed_count,
                EXISTS (SELECT 1 FROM progress p
                         WHERE p.chapter_id = ch.id AND p.user_id = $1) AS viewer_completed
            FROM chapters ch
            JOIN members me ON me.club_id = ch.club_id AND me.user_id = $1
            ORDER BY ch.club_id, ch.position
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ClubChapterTally {
                club_id: r.club_id,
                position: r.position,
                tally: ChapterTally::new(r.member_count, r.completed_count, r.viewer_completed),
            })
            .collect())
    }

    async fn tally(&self, chapter_id: i64, viewer_id: i64) -> Result<ChapterTally, AppError> {
        let row = sqlx::query_as::<_, TallyRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM members m WHERE m.club_id = ch.club_id) AS member_count,
                (SELECT COUNT(*) FROM progress p
                   JOIN members m ON m.user_id = p.user_id AND m.club_id = ch.club_id
                  WHERE p.chapter_id = ch.id) AS completed_count,
                EXISTS (SELECT 1 FROM progress p
                         WHERE p.chapter_id = ch.id AND p.user_id = $2) AS viewer_completed
            FROM chapters ch
            WHERE ch.id = $1
            "#,
        )
        .bind(chapter_id)
        .bind(viewer_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row
            .map(|r| ChapterTally::new(r.member_count, r.completed_count, r.viewer_completed))
            .unwrap_or_default())
    }

    async fn set_completed(
        &self,
        chapter_id: i64,
        user_id: i64,
        completed: bool,
    ) -> Result<bool, AppError> {
        let result = if completed {
            sqlx::query(
                r#"
                INSERT INTO progress (chapter_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (chapter_id, user_id) DO NOTHING
                "#,
            )
            .bind(chapter_id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?
        } else {
            sqlx::query("DELETE FROM progress WHERE chapter_id = $1 AND user_id = $2")
                .bind(chapter_id)
                .bind(user_id)
                .execute(self.pool.as_ref())
                .await?
        };

        Ok(result.rows_affected() > 0)
    }
}
