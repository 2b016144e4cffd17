//! Handlers for chapter progress.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::progress::{
    BatchProgressRequest, BatchProgressResponse, ProgressUpdateResponse,
};
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Marks a chapter as completed by the caller.
///
/// # Endpoint
///
/// `PUT /api/chapters/{id}/progress`
///
/// Idempotent. The response carries the chapter's new status and the club's
/// recomputed progress so clients can update both views at once.
pub async fn complete_chapter_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(chapter_id): Path<i64>,
) -> Result<Json<ProgressUpdateResponse>, AppError> {
    set_progress(&state, user, chapter_id, true).await
}

/// Clears the caller's completion of a chapter.
///
/// `DELETE /api/chapters/{id}/progress`
pub async fn uncomplete_chapter_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(chapter_id): Path<i64>,
) -> Result<Json<ProgressUpdateResponse>, AppError> {
    set_progress(&state, user, chapter_id, false).await
}

async fn set_progress(
    state: &AppState,
    user: CurrentUser,
    chapter_id: i64,
    completed: bool,
) -> Result<Json<ProgressUpdateResponse>, AppError> {
    let update = state
        .progress_service
        .set_chapter_completed(user.id, chapter_id, completed)
        .await?;

    Ok(Json(update.into()))
}

/// Marks or unmarks several chapters of a club.
///
/// # Endpoint
///
/// `PUT /api/clubs/{id}/progress`
///
/// # Batch Processing
///
/// Chapters are processed independently. If one fails, the others are still
/// applied and the failure is reported in its item.
///
/// # Errors
///
/// Returns 400 for an empty or oversized id list and 403 for non-members.
pub async fn batch_progress_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(club_id): Path<i64>,
    Json(payload): Json<BatchProgressRequest>,
) -> Result<Json<BatchProgressResponse>, AppError> {
    payload.validate()?;

    let batch = state
        .progress_service
        .set_chapters_completed(user.id, club_id, &payload.chapter_ids, payload.completed)
        .await?;

    Ok(Json(batch.into()))
}

#[cfg(test)]
mod tests {
    use crate::api::handlers::test_support::{TOKEN, TestMocks, member};
    use crate::domain::entities::{Chapter, ChapterWithTally, MemberRole};
    use crate::domain::progress::ChapterTally;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    fn chapter(id: i64) -> Chapter {
        Chapter {
            id,
            club_id: 9,
            position: id as i32,
            title: format!("Chapter {id}"),
        }
    }

    /// Club 9 with two members and two chapters; user 2 is a member.
    fn mocks() -> TestMocks {
        let mut mocks = TestMocks::new().authenticated_as(2);
        mocks.members.expect_find().returning(|c, u| {
            Ok((c == 9 && (u == 1 || u == 2)).then(|| member(c, u, MemberRole::Member)))
        });
        mocks
            .chapters
            .expect_find_by_id()
            .returning(|id| Ok((id == 1 || id == 2).then(|| chapter(id))));
        mocks.chapters.expect_list_with_tallies().returning(|_, _| {
            Ok(vec![
                ChapterWithTally {
                    chapter: chapter(1),
                    tally: ChapterTally::new(2, 1, false),
                },
                ChapterWithTally {
                    chapter: chapter(2),
                    tally: ChapterTally::new(2, 1, true),
                },
            ])
        });
        mocks
    }

    #[tokio::test]
    async fn test_complete_chapter() {
        let mut mocks = mocks();
        mocks
            .chapters
            .expect_set_completed()
            .returning(|_, _, _| Ok(true));

        let response = mocks
            .server()
            .put("/api/chapters/1/progress")
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["chapter_status"], "all_complete");
        assert_eq!(body["completed_count"], 2);
        assert_eq!(body["club"]["status"], "complete");
        assert!(body["club"]["current_chapter"].is_null());
    }

    #[tokio::test]
    async fn test_uncomplete_chapter() {
        let mut mocks = mocks();
        mocks
            .chapters
            .expect_set_completed()
            .withf(|_, _, completed| !*completed)
            .returning(|_, _, _| Ok(true));

        let response = mocks
            .server()
            .delete("/api/chapters/2/progress")
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["chapter_status"], "not_started");
        assert_eq!(body["club"]["status"], "incomplete");
    }

    #[tokio::test]
    async fn test_unknown_chapter() {
        let response = mocks()
            .server()
            .put("/api/chapters/77/progress")
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_batch_progress_reports_each_chapter() {
        let mut mocks = mocks();
        mocks
            .chapters
            .expect_set_completed()
            .returning(|_, _, _| Ok(true));

        let response = mocks
            .server()
            .put("/api/clubs/9/progress")
            .authorization_bearer(TOKEN)
            .json(&json!({ "chapter_ids": [1, 55], "completed": true }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["summary"]["successful"], 1);
        assert_eq!(body["summary"]["failed"], 1);
        assert_eq!(body["items"][0]["ok"], true);
        assert_eq!(body["items"][0]["status"], "all_complete");
        assert_eq!(body["items"][1]["ok"], false);
        assert_eq!(body["items"][1]["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn test_batch_progress_rejects_empty_list() {
        let response = mocks()
            .server()
            .put("/api/clubs/9/progress")
            .authorization_bearer(TOKEN)
            .json(&json!({ "chapter_ids": [] }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
