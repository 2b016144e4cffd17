//! Chapter progress updates.
//!
//! Responses are derived with [`ChapterTally::with_viewer_completed`] from the
//! tallies read just before the write, so a progress update costs one read
//! and one write. The derivation is the same one the club views use.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;

use super::access::require_member;
use crate::domain::entities::ChapterWithTally;
use crate::domain::progress::{ChapterTally, ClubProgress, ProgressStatus, club_progress};
use crate::domain::repositories::{ChapterRepository, MemberRepository};
use crate::error::AppError;

/// Maximum number of chapters accepted by one batch update.
pub const MAX_BATCH_CHAPTERS: usize = 100;

/// Result of marking a single chapter.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub chapter_id: i64,
    pub club_id: i64,
    pub chapter_status: ProgressStatus,
    pub completed_count: i64,
    pub member_count: i64,
    pub club: ClubProgress,
}

/// Per-chapter outcome inside a batch update.
#[derive(Debug)]
pub struct ChapterOutcome {
    pub chapter_id: i64,
    pub result: Result<ProgressStatus, AppError>,
}

#[derive(Debug)]
pub struct BatchProgressUpdate {
    pub club_id: i64,
    pub results: Vec<ChapterOutcome>,
    pub club: ClubProgress,
}

pub struct ProgressService {
    chapters: Arc<dyn ChapterRepository>,
    members: Arc<dyn MemberRepository>,
}

impl ProgressService {
    pub fn new(chapters: Arc<dyn ChapterRepository>, members: Arc<dyn MemberRepository>) -> Self {
        Self { chapters, members }
    }

    /// Marks or unmarks a chapter as completed by the caller.
    ///
    /// Idempotent: repeating the same call leaves counts unchanged.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the chapter does not exist
    /// - [`AppError::Forbidden`] if the caller is not a member of its club
    pub async fn set_chapter_completed(
        &self,
        user_id: i64,
        chapter_id: i64,
        completed: bool,
    ) -> Result<ProgressUpdate, AppError> {
        let chapter = self
            .chapters
            .find_by_id(chapter_id)
            .await?
            .ok_or_else(|| chapter_not_found(chapter_id))?;

        let club_id = chapter.club_id;
        require_member(self.members.as_ref(), club_id, user_id).await?;

        let mut rows = self.chapters.list_with_tallies(club_id, user_id).await?;

        let changed = self
            .chapters
            .set_completed(chapter_id, user_id, completed)
            .await?;
        record_update(completed, changed);

        let tally = match rows.iter_mut().find(|r| r.chapter.id == chapter_id) {
            Some(row) => {
                row.tally = row.tally.with_viewer_completed(completed);
                row.tally
            }
            None => self.chapters.tally(chapter_id, user_id).await?,
        };

        tracing::info!(
            chapter_id,
            club_id,
            user_id,
            completed,
            changed,
            "Chapter progress updated"
        );

        Ok(ProgressUpdate {
            chapter_id,
            club_id,
            chapter_status: tally.status(),
            completed_count: tally.completed_count,
            member_count: tally.member_count,
            club: club_progress(&tallies_of(&rows)),
        })
    }

    /// Marks or unmarks several chapters of one club.
    ///
    /// Each chapter is applied on its own: an unknown chapter or a failed
    /// write is reported in its outcome and the remaining chapters are still
    /// processed.
    ///
    /// # Errors
    ///
    /// Fails as a whole only when the caller is not a member, the id list is
    /// empty or too long, or the club's chapters cannot be loaded.
    pub async fn set_chapters_completed(
        &self,
        user_id: i64,
        club_id: i64,
        chapter_ids: &[i64],
        completed: bool,
    ) -> Result<BatchProgressUpdate, AppError> {
        if chapter_ids.is_empty() || chapter_ids.len() > MAX_BATCH_CHAPTERS {
            return Err(AppError::bad_request(
                format!("Provide between 1 and {MAX_BATCH_CHAPTERS} chapter ids"),
                json!({ "count": chapter_ids.len() }),
            ));
        }

        require_member(self.members.as_ref(), club_id, user_id).await?;

        let mut rows = self.chapters.list_with_tallies(club_id, user_id).await?;
        let mut seen = HashSet::new();
        let mut results = Vec::with_capacity(chapter_ids.len());

        for &chapter_id in chapter_ids {
            if !seen.insert(chapter_id) {
                continue;
            }

            let Some(row) = rows.iter_mut().find(|r| r.chapter.id == chapter_id) else {
                results.push(ChapterOutcome {
                    chapter_id,
                    result: Err(chapter_not_found(chapter_id)),
                });
                continue;
            };

            let result = match self
                .chapters
                .set_completed(chapter_id, user_id, completed)
                .await
            {
                Ok(changed) => {
                    record_update(completed, changed);
                    row.tally = row.tally.with_viewer_completed(completed);
                    Ok(row.tally.status())
                }
                Err(e) => {
                    tracing::warn!(
                        chapter_id,
                        club_id,
                        error = %e,
                        "Chapter progress update failed"
                    );
                    Err(e)
                }
            };

            results.push(ChapterOutcome { chapter_id, result });
        }

        let failed = results.iter().filter(|r| r.result.is_err()).count();
        tracing::info!(
            club_id,
            user_id,
            completed,
            total = results.len(),
            failed,
            "Batch progress update"
        );

        Ok(BatchProgressUpdate {
            club_id,
            results,
            club: club_progress(&tallies_of(&rows)),
        })
    }
}

fn tallies_of(rows: &[ChapterWithTally]) -> Vec<ChapterTally> {
    rows.iter().map(|r| r.tally).collect()
}

fn record_update(completed: bool, changed: bool) {
    if changed {
        let action = if completed { "mark" } else { "unmark" };
        metrics::counter!("progress_updates_total", "action" => action).increment(1);
    }
}

fn chapter_not_found(chapter_id: i64) -> AppError {
    AppError::not_found("Chapter not found", json!({ "chapter_id": chapter_id }))
}
