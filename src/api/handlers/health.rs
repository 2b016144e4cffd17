//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: counts users
/// 2. **Cache**: Redis PING (always ok when caching is disabled)
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (database, cache) = tokio::join!(check_database(&state), check_cache(&state));

    let all_healthy = database.is_ok() && cache.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, cache },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.auth_service.count_users().await {
        Ok(users) => CheckStatus::ok(format!("Connected, {users} users")),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();

    if state.cache.health_check().await {
        CheckStatus::ok(format!("{backend} available"))
    } else {
        CheckStatus::error(format!("{backend} connection failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::TestMocks;
    use crate::error::AppError;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_healthy() {
        let mut mocks = TestMocks::new();
        mocks.users.expect_count().returning(|| Ok(3));
        mocks.cache.expect_health_check().returning(|| true);
        mocks.cache.expect_backend().return_const("redis");

        let response = mocks.server().get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"]["cache"]["message"], "redis available");
    }

    #[tokio::test]
    async fn test_database_failure_is_degraded() {
        let mut mocks = TestMocks::new();
        mocks
            .users
            .expect_count()
            .returning(|| Err(AppError::internal("Database error", json!({}))));
        mocks.cache.expect_health_check().returning(|| true);
        mocks.cache.expect_backend().return_const("disabled");

        let response = mocks.server().get("/health").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = response.json();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"]["database"]["status"], "error");
    }
}
