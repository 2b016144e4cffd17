//! Handlers for chapter discussions and their comments.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::conversation::{
    CommentResponse, CreateCommentRequest, CreateDiscussionRequest, DiscussionResponse,
};
use crate::api::dto::pagination::{Paged, PaginationParams};
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/chapters/{id}/discussions`
pub async fn create_discussion_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(chapter_id): Path<i64>,
    Json(payload): Json<CreateDiscussionRequest>,
) -> Result<(StatusCode, Json<DiscussionResponse>), AppError> {
    payload.validate()?;

    let discussion = state
        .conversation_service
        .create_discussion(user.id, chapter_id, &payload.title, &payload.body)
        .await?;

    Ok((StatusCode::CREATED, Json(discussion.into())))
}

/// `GET /api/chapters/{id}/discussions`
pub async fn list_discussions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(chapter_id): Path<i64>,
) -> Result<Json<Vec<DiscussionResponse>>, AppError> {
    let discussions = state
        .conversation_service
        .list_discussions(user.id, chapter_id)
        .await?;

    Ok(Json(discussions.into_iter().map(Into::into).collect()))
}

/// `GET /api/discussions/{id}`
pub async fn get_discussion_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(discussion_id): Path<i64>,
) -> Result<Json<DiscussionResponse>, AppError> {
    let discussion = state
        .conversation_service
        .get_discussion(user.id, discussion_id)
        .await?;

    Ok(Json(discussion.into()))
}

/// `DELETE /api/discussions/{id}` (author or club owner)
pub async fn delete_discussion_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(discussion_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .conversation_service
        .delete_discussion(user.id, discussion_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/discussions/{id}/comments`
pub async fn create_comment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(discussion_id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    payload.validate()?;

    let comment = state
        .conversation_service
        .create_comment(user.id, discussion_id, &payload.body)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// Lists a discussion's comments, oldest first.
///
/// `GET /api/discussions/{id}/comments?page=1&page_size=25`
pub async fn list_comments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(discussion_id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paged<CommentResponse>>, AppError> {
    let page = params.validate()?;

    let (comments, total) = state
        .conversation_service
        .list_comments(user.id, discussion_id, page.offset(), page.limit())
        .await?;

    Ok(Json(Paged::new(
        comments.into_iter().map(Into::into).collect(),
        page,
        total,
    )))
}

/// `DELETE /api/comments/{id}` (author or club owner)
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .conversation_service
        .delete_comment(user.id, comment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
