//! Web-push subscription registry.
//!
//! Subscriptions are only stored here; delivering notifications is left to
//! an external sender reading the `subscriptions` table.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewSubscription, Subscription};
use crate::domain::repositories::SubscriptionRepository;
use crate::error::AppError;

pub struct SubscriptionService {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    /// Registers a push endpoint for the caller.
    ///
    /// An endpoint already registered (by anyone) is re-keyed and moved to
    /// the caller, since browsers hand out one endpoint per installation.
    pub async fn subscribe(
        &self,
        new_subscription: NewSubscription,
    ) -> Result<Subscription, AppError> {
        let subscription = self.subscriptions.upsert(new_subscription).await?;
        tracing::info!(
            user_id = subscription.user_id,
            subscription_id = subscription.id,
            "Push subscription stored"
        );
        Ok(subscription)
    }

    pub async fn unsubscribe(&self, user_id: i64, endpoint: &str) -> Result<(), AppError> {
        if !self.subscriptions.delete(user_id, endpoint).await? {
            return Err(AppError::not_found(
                "Subscription not found",
                json!({ "endpoint": endpoint }),
            ));
        }

        tracing::info!(user_id, "Push subscription removed");
        Ok(())
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<Subscription>, AppError> {
        self.subscriptions.list_for_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockSubscriptionRepository;

    #[tokio::test]
    async fn test_unsubscribe_unknown_endpoint() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_delete().returning(|_, _| Ok(false));

        let svc = SubscriptionService::new(Arc::new(repo));
        let err = svc.unsubscribe(1, "https://push.example/abc").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unsubscribe_is_scoped_to_user() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_delete()
            .withf(|user_id, endpoint| *user_id == 4 && endpoint == "https://push.example/abc")
            .times(1)
            .returning(|_, _| Ok(true));

        let svc = SubscriptionService::new(Arc::new(repo));
        assert!(svc.unsubscribe(4, "https://push.example/abc").await.is_ok());
    }
}
