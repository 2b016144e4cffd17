//! Handlers for club invites.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::club::ClubResponse;
use crate::api::dto::invite::{CreateInviteRequest, InviteResponse};
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an invite code for a club.
///
/// # Endpoint
///
/// `POST /api/clubs/{id}/invites`
///
/// The body is optional; `{"ttl_hours": 24}` overrides the default lifetime.
pub async fn create_invite_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(club_id): Path<i64>,
    payload: Option<Json<CreateInviteRequest>>,
) -> Result<(StatusCode, Json<InviteResponse>), AppError> {
    let Json(payload) = payload.unwrap_or_default();
    payload.validate()?;

    let invite = state
        .invite_service
        .create_invite(user.id, club_id, payload.ttl_hours)
        .await?;

    Ok((StatusCode::CREATED, Json(invite.into())))
}

/// `GET /api/clubs/{id}/invites`
pub async fn list_invites_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(club_id): Path<i64>,
) -> Result<Json<Vec<InviteResponse>>, AppError> {
    let invites = state.invite_service.list_invites(user.id, club_id).await?;
    Ok(Json(invites.into_iter().map(Into::into).collect()))
}

/// `DELETE /api/clubs/{id}/invites/{invite_id}` (owner or invite creator)
pub async fn revoke_invite_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((club_id, invite_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state
        .invite_service
        .revoke_invite(user.id, club_id, invite_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Joins the club behind an invite code.
///
/// # Endpoint
///
/// `POST /api/invites/{code}/accept`
///
/// # Response Codes
///
/// - **201 Created**: joined the club
/// - **200 OK**: already a member, nothing changed
/// - **400 Bad Request**: invite expired or revoked
/// - **404 Not Found**: unknown code
pub async fn accept_invite_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(code): Path<String>,
) -> Result<(StatusCode, Json<ClubResponse>), AppError> {
    let accepted = state.invite_service.accept_invite(user.id, &code).await?;

    let status = if accepted.joined {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(accepted.club.into())))
}

#[cfg(test)]
mod tests {
    use crate::api::handlers::test_support::{TOKEN, TestMocks, club, member};
    use crate::domain::entities::{ClubInvite, MemberRole};
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};

    const CODE: &str = "Zm9vYmFyYmF6";

    fn invite(expires_in_hours: i64) -> ClubInvite {
        ClubInvite {
            id: 3,
            club_id: 9,
            code: CODE.to_string(),
            created_by: 1,
            created_at: Utc::now(),
            expires_at: Some(Utc::now() + Duration::hours(expires_in_hours)),
            revoked_at: None,
            uses: 0,
        }
    }

    #[tokio::test]
    async fn test_create_invite_without_body() {
        let mut mocks = TestMocks::new()
            .authenticated_as(2)
            .with_membership(9, 2, MemberRole::Member);
        mocks.invites.expect_find_by_code().returning(|_| Ok(None));
        mocks.invites.expect_create().returning(|new| {
            Ok(ClubInvite {
                id: 3,
                club_id: new.club_id,
                code: new.code,
                created_by: new.created_by,
                created_at: Utc::now(),
                expires_at: new.expires_at,
                revoked_at: None,
                uses: 0,
            })
        });

        let response = mocks
            .server()
            .post("/api/clubs/9/invites")
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["code"].as_str().map(str::len), Some(12));
        assert_eq!(body["usable"], true);
    }

    #[tokio::test]
    async fn test_create_invite_rejects_bad_ttl() {
        let mocks = TestMocks::new().authenticated_as(2);

        let response = mocks
            .server()
            .post("/api/clubs/9/invites")
            .authorization_bearer(TOKEN)
            .json(&json!({ "ttl_hours": 0 }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_accept_invite_joins() {
        let mut mocks = TestMocks::new().authenticated_as(5);
        mocks
            .invites
            .expect_find_by_code()
            .returning(|_| Ok(Some(invite(1))));
        mocks.invites.expect_increment_uses().times(1).returning(|_| Ok(()));
        mocks
            .clubs
            .expect_find_by_id()
            .returning(|id| Ok(Some(club(id, 1))));
        mocks.members.expect_find().returning(|_, _| Ok(None));
        mocks.members.expect_add().returning(|_, _, _| Ok(true));

        let response = mocks
            .server()
            .post(&format!("/api/invites/{CODE}/accept"))
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["id"], 9);
    }

    #[tokio::test]
    async fn test_accept_invite_again_is_ok() {
        let mut mocks = TestMocks::new().authenticated_as(5);
        mocks
            .invites
            .expect_find_by_code()
            .returning(|_| Ok(Some(invite(-1))));
        mocks.invites.expect_increment_uses().times(0);
        mocks
            .clubs
            .expect_find_by_id()
            .returning(|id| Ok(Some(club(id, 1))));
        mocks
            .members
            .expect_find()
            .returning(|c, u| Ok(Some(member(c, u, MemberRole::Member))));
        mocks.members.expect_add().times(0);

        let response = mocks
            .server()
            .post(&format!("/api/invites/{CODE}/accept"))
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_accept_expired_invite() {
        let mut mocks = TestMocks::new().authenticated_as(5);
        mocks
            .invites
            .expect_find_by_code()
            .returning(|_| Ok(Some(invite(-1))));
        mocks.members.expect_find().returning(|_, _| Ok(None));

        let response = mocks
            .server()
            .post(&format!("/api/invites/{CODE}/accept"))
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_member_cannot_revoke_others_invite() {
        let mut mocks = TestMocks::new()
            .authenticated_as(2)
            .with_membership(9, 2, MemberRole::Member);
        mocks
            .invites
            .expect_find_by_id()
            .returning(|_| Ok(Some(invite(1))));

        let response = mocks
            .server()
            .delete("/api/clubs/9/invites/3")
            .authorization_bearer(TOKEN)
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }
}
