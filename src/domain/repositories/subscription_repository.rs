//! Repository trait for web-push subscriptions.

use crate::domain::entities::{NewSubscription, Subscription};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Inserts a subscription, or re-assigns an existing endpoint to the
    /// caller and refreshes its keys.
    async fn upsert(&self, new_subscription: NewSubscription) -> Result<Subscription, AppError>;

    /// Returns `Ok(false)` if the user had no subscription for the endpoint.
    async fn delete(&self, user_id: i64, endpoint: &str) -> Result<bool, AppError>;

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Subscription>, AppError>;
}
