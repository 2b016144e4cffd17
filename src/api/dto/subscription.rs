//! DTOs for web-push subscription registration.
//!
//! Mirrors the browser `PushSubscription.toJSON()` shape:
//!
//! ```json
//! {
//!   "endpoint": "https://fcm.googleapis.com/fcm/send/abc...",
//!   "keys": { "p256dh": "BNc...", "auth": "tBH..." }
//! }
//! ```

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Subscription;

/// Push keys are unpadded or padded base64url.
static PUSH_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+={0,2}$").expect("push key pattern is valid"));

#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048))]
    pub endpoint: String,

    #[validate(nested)]
    pub keys: PushKeys,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PushKeys {
    #[validate(length(min = 1, max = 256))]
    #[validate(regex(path = *PUSH_KEY_REGEX, message = "must be base64url"))]
    pub p256dh: String,

    #[validate(length(min = 1, max = 256))]
    #[validate(regex(path = *PUSH_KEY_REGEX, message = "must be base64url"))]
    pub auth: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UnsubscribeRequest {
    #[validate(length(min = 1, max = 2048))]
    pub endpoint: String,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub endpoint: String,
    pub created_at: DateTime<Utc>,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id,
            endpoint: subscription.endpoint,
            created_at: subscription.created_at,
        }
    }
}
