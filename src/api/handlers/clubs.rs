//! Handlers for clubs and membership.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::club::{
    ClubDetailResponse, ClubResponse, ClubSummaryResponse, CreateClubRequest, MemberResponse,
    UpdateClubRequest,
};
use crate::domain::entities::{CurrentUser, NewClub};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a club; the caller becomes its owner.
///
/// # Endpoint
///
/// `POST /api/clubs`
///
/// # Errors
///
/// Returns 400 Bad Request for blank names, missing chapters or more than
/// 500 chapters.
pub async fn create_club_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateClubRequest>,
) -> Result<(StatusCode, Json<ClubDetailResponse>), AppError> {
    payload.validate()?;

    let detail = state
        .club_service
        .create_club(NewClub {
            name: payload.name,
            book_title: payload.book_title,
            book_author: payload.book_author,
            cover_url: payload.cover_url,
            owner_id: user.id,
            chapters: payload.chapters,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// Lists the caller's clubs with reading progress.
///
/// `GET /api/clubs`
pub async fn list_clubs_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<ClubSummaryResponse>>, AppError> {
    let clubs = state.club_service.list_clubs(user.id).await?;
    Ok(Json(clubs.into_iter().map(Into::into).collect()))
}

/// Club detail with every chapter's status.
///
/// # Endpoint
///
/// `GET /api/clubs/{id}`
///
/// # Errors
///
/// - 404 if the club does not exist
/// - 403 if the caller is not a member
pub async fn get_club_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(club_id): Path<i64>,
) -> Result<Json<ClubDetailResponse>, AppError> {
    let detail = state.club_service.get_club(user.id, club_id).await?;
    Ok(Json(detail.into()))
}

/// Partially updates a club. Owner only.
///
/// # Endpoint
///
/// `PATCH /api/clubs/{id}`
///
/// ```json
/// { "name": "Renamed", "cover_url": null }
/// ```
pub async fn update_club_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(club_id): Path<i64>,
    Json(payload): Json<UpdateClubRequest>,
) -> Result<Json<ClubResponse>, AppError> {
    payload.validate()?;
    payload.validate_nested()?;

    let club = state
        .club_service
        .update_club(user.id, club_id, payload.into_patch())
        .await?;

    Ok(Json(club.into()))
}

/// `DELETE /api/clubs/{id}` (owner only)
pub async fn delete_club_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(club_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.club_service.delete_club(user.id, club_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/clubs/{id}/members`
pub async fn list_members_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(club_id): Path<i64>,
) -> Result<Json<Vec<MemberResponse>>, AppError> {
    let members = state.club_service.list_members(user.id, club_id).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// Leaves a club, discarding the caller's progress in it.
///
/// # Endpoint
///
/// `POST /api/clubs/{id}/leave`
///
/// # Errors
///
/// Returns 409 Conflict for the owner.
pub async fn leave_club_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(club_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.club_service.leave_club(user.id, club_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
