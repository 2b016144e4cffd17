//! Handler for the authenticated user's profile.

use axum::{Extension, Json, extract::State};

use crate::api::dto::user::UserResponse;
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/me`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserResponse>, AppError> {
    let profile = state.auth_service.profile(user).await?;
    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use crate::api::handlers::test_support::{TOKEN, TestMocks};
    use crate::domain::entities::User;
    use axum::http::{StatusCode, header};
    use chrono::Utc;
    use serde_json::Value;

    #[tokio::test]
    async fn test_me_returns_profile() {
        let mut mocks = TestMocks::new().authenticated_as(4);
        mocks.users.expect_find_by_id().returning(|id| {
            Ok(Some(User {
                id,
                username: "margaret".to_string(),
                display_name: "Margaret".to_string(),
                created_at: Utc::now(),
            }))
        });

        let response = mocks.server().get("/api/me").authorization_bearer(TOKEN).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["id"], 4);
        assert_eq!(body["username"], "margaret");
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let response = TestMocks::new().server().get("/api/me").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.header(header::WWW_AUTHENTICATE), "Bearer");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "unauthorized");
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let mut mocks = TestMocks::new();
        mocks.tokens.expect_find_active_user().returning(|_| Ok(None));

        let response = mocks.server().get("/api/me").authorization_bearer("nope").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
