//! Per-client rate limiting using the token bucket algorithm.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Sustained rate: one token is replenished every this many milliseconds.
const REPLENISH_INTERVAL_MS: u64 = 500;
const BURST_SIZE: u32 = 60;

/// Wraps `router` with a per-client rate limiter.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 60 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// With `behind_proxy` the client IP is read from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded` (falling back to the peer address). Enable it
/// only behind a trusted reverse proxy, since clients can forge these headers.
/// Otherwise the socket peer address is used, which requires serving with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn apply(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        let config = GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_millisecond(REPLENISH_INTERVAL_MS)
            .burst_size(BURST_SIZE)
            .finish();

        match config {
            Some(config) => router.layer(GovernorLayer::new(Arc::new(config))),
            None => skip(router),
        }
    } else {
        let config = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_millisecond(REPLENISH_INTERVAL_MS)
            .burst_size(BURST_SIZE)
            .finish();

        match config {
            Some(config) => router.layer(GovernorLayer::new(Arc::new(config))),
            None => skip(router),
        }
    }
}

fn skip(router: Router<AppState>) -> Router<AppState> {
    tracing::warn!("Invalid rate limiter configuration, rate limiting disabled");
    router
}
