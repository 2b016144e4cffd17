//! DTOs for chapter progress updates.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{BatchProgressUpdate, ChapterOutcome, ProgressUpdate};
use crate::domain::progress::{ClubProgress, ProgressStatus};
use crate::error::ErrorInfo;

#[derive(Debug, Serialize)]
pub struct ProgressUpdateResponse {
    pub chapter_id: i64,
    pub club_id: i64,
    pub chapter_status: ProgressStatus,
    pub completed_count: i64,
    pub member_count: i64,
    pub club: ClubProgress,
}

impl From<ProgressUpdate> for ProgressUpdateResponse {
    fn from(update: ProgressUpdate) -> Self {
        Self {
            chapter_id: update.chapter_id,
            club_id: update.club_id,
            chapter_status: update.chapter_status,
            completed_count: update.completed_count,
            member_count: update.member_count,
            club: update.club,
        }
    }
}

/// Marks or unmarks several chapters of a club at once.
///
/// ```json
/// { "chapter_ids": [12, 13, 14], "completed": true }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct BatchProgressRequest {
    #[validate(length(min = 1, max = 100, message = "must contain 1-100 chapter ids"))]
    pub chapter_ids: Vec<i64>,

    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

/// Response containing per-chapter results of a batch update.
#[derive(Debug, Serialize)]
pub struct BatchProgressResponse {
    pub club_id: i64,
    pub summary: BatchSummary,
    pub items: Vec<ChapterResultItem>,
    pub club: ClubProgress,
}

/// Individual result for a chapter in the batch.
///
/// ```json
/// { "chapter_id": 12, "ok": true, "status": "complete" }
/// { "chapter_id": 99, "ok": false, "error": { "code": "not_found", ... } }
/// ```
#[derive(Debug, Serialize)]
pub struct ChapterResultItem {
    pub chapter_id: i64,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProgressStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl From<ChapterOutcome> for ChapterResultItem {
    fn from(outcome: ChapterOutcome) -> Self {
        match outcome.result {
            Ok(status) => ChapterResultItem {
                chapter_id: outcome.chapter_id,
                ok: true,
                status: Some(status),
                error: None,
            },
            Err(e) => ChapterResultItem {
                chapter_id: outcome.chapter_id,
                ok: false,
                status: None,
                error: Some(e.to_error_info()),
            },
        }
    }
}

impl From<BatchProgressUpdate> for BatchProgressResponse {
    fn from(batch: BatchProgressUpdate) -> Self {
        let total = batch.results.len();
        let failed = batch.results.iter().filter(|r| r.result.is_err()).count();

        Self {
            club_id: batch.club_id,
            summary: BatchSummary {
                total,
                successful: total - failed,
                failed,
            },
            items: batch.results.into_iter().map(Into::into).collect(),
            club: batch.club,
        }
    }
}
