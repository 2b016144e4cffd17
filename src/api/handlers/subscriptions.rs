//! Handlers for web-push subscription registration.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::subscription::{SubscribeRequest, SubscriptionResponse, UnsubscribeRequest};
use crate::domain::entities::{CurrentUser, NewSubscription};
use crate::error::AppError;
use crate::state::AppState;

/// Registers (or re-registers) a push endpoint for the caller.
///
/// # Endpoint
///
/// `POST /api/subscriptions`
pub async fn subscribe_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    payload.validate()?;

    let subscription = state
        .subscription_service
        .subscribe(NewSubscription {
            user_id: user.id,
            endpoint: payload.endpoint,
            p256dh: payload.keys.p256dh,
            auth: payload.keys.auth,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(subscription.into())))
}

/// `GET /api/subscriptions`
pub async fn list_subscriptions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<SubscriptionResponse>>, AppError> {
    let subscriptions = state.subscription_service.list(user.id).await?;
    Ok(Json(subscriptions.into_iter().map(Into::into).collect()))
}

/// `DELETE /api/subscriptions` with `{"endpoint": "..."}`
pub async fn unsubscribe_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UnsubscribeRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .subscription_service
        .unsubscribe(user.id, &payload.endpoint)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::handlers::test_support::{TOKEN, TestMocks};
    use crate::domain::entities::Subscription;
    use axum::http::StatusCode;
    use chrono::Utc;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_subscribe() {
        let mut mocks = TestMocks::new().authenticated_as(2);
        mocks
            .subscriptions
            .expect_upsert()
            .withf(|s| s.user_id == 2 && s.auth == "tBHItJI5svbpez7KI4CCXg")
            .returning(|s| {
                Ok(Subscription {
                    id: 1,
                    user_id: s.user_id,
                    endpoint: s.endpoint,
                    p256dh: s.p256dh,
                    auth: s.auth,
                    created_at: Utc::now(),
                })
            });

        let response = mocks
            .server()
            .post("/api/subscriptions")
            .authorization_bearer(TOKEN)
            .json(&json!({
                "endpoint": "https://push.example.com/send/abc",
                "keys": {
                    "p256dh": "BNcRdreALRFXTkOOUHK1EtK2wtaz5Ry4YfYCA_0QTpQ",
                    "auth": "tBHItJI5svbpez7KI4CCXg"
                }
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["endpoint"], "https://push.example.com/send/abc");
        assert!(body.get("auth").is_none());
    }

    #[tokio::test]
    async fn test_unsubscribe_unknown() {
        let mut mocks = TestMocks::new().authenticated_as(2);
        mocks
            .subscriptions
            .expect_delete()
            .returning(|_, _| Ok(false));

        let response = mocks
            .server()
            .delete("/api/subscriptions")
            .authorization_bearer(TOKEN)
            .json(&json!({ "endpoint": "https://push.example.com/send/abc" }))
            .await;

        response.assert_status_not_found();
    }
}
