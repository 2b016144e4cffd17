//! Handlers for club posts.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::conversation::{CreatePostRequest, PostResponse};
use crate::api::dto::pagination::{Paged, PaginationParams};
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/clubs/{id}/posts`
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(club_id): Path<i64>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    payload.validate()?;

    let post = state
        .conversation_service
        .create_post(user.id, club_id, &payload.body)
        .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Lists a club's posts, newest first.
///
/// # Endpoint
///
/// `GET /api/clubs/{id}/posts?page=1&page_size=25`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 100)
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(club_id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paged<PostResponse>>, AppError> {
    let page = params.validate()?;

    let (posts, total) = state
        .conversation_service
        .list_posts(user.id, club_id, page.offset(), page.limit())
        .await?;

    Ok(Json(Paged::new(
        posts.into_iter().map(Into::into).collect(),
        page,
        total,
    )))
}

/// `DELETE /api/posts/{id}` (author or club owner)
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .conversation_service
        .delete_post(user.id, post_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
