//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

const PER_SECOND: u64 = 2;
const BURST: u32 = 100;

/// Rate limiter keyed by the socket peer address.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Same limits as [`layer`], keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`
/// with the peer address as fallback.
///
/// Only safe behind a reverse proxy that overwrites these headers.
pub fn proxy_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(PER_SECOND)
            .burst_size(BURST)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Wraps `router` with the limiter matching the deployment.
///
/// ```rust,ignore
/// let api = rate_limit::apply(api::routes::protected_routes(), config.behind_proxy);
/// ```
pub fn apply(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(proxy_layer())
    } else {
        router.layer(layer())
    }
}
