//! Authentication service for API token validation.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{CurrentUser, User};
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::token::hash_token;

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// lookup. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService {
    tokens: Arc<dyn TokenRepository>,
    users: Arc<dyn UserRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when tokens were created.
    pub fn new(
        tokens: Arc<dyn TokenRepository>,
        users: Arc<dyn UserRepository>,
        signing_secret: String,
    ) -> Self {
        Self {
            tokens,
            users,
            signing_secret,
        }
    }

    /// Authenticates a raw token and resolves its owner.
    ///
    /// On success, updates the token's `last_used_at` timestamp; failures of
    /// that update are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let user_id = self
            .tokens
            .find_active_user(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or revoked token" }),
                )
            })?;

        if let Err(e) = self.tokens.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, user_id, "Failed to update token last_used_at");
        }

        Ok(CurrentUser { id: user_id })
    }

    /// Loads the full user record of an authenticated caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user was deleted after authentication.
    pub async fn profile(&self, user: CurrentUser) -> Result<User, AppError> {
        self.users
            .find_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": user.id })))
    }

    /// Counts users; used as the database health probe.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.users.count().await
    }
}
