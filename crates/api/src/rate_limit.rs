//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Limits requests per peer IP with tower_governor. Requires the service to
//! be served with `into_make_service_with_connect_info::<SocketAddr>()`.

use governor::middleware::StateInformationMiddleware;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tracing::debug;

/// Governor config with X-RateLimit-* headers
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Layer type installed on the router
pub type RateLimitLayer = GovernorLayer<PeerIpKeyExtractor, StateInformationMiddleware>;

/// How often stale per-IP state is purged
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Disable to serve without limits
    pub enabled: bool,
    /// Seconds to replenish one request
    pub per_second: u64,
    /// Burst size (max requests that can be made immediately)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_second: 1,
            burst_size: 20,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid rate limit: per_second and burst_size must be non-zero")]
pub struct InvalidRateLimit;

/// Create a rate limiting governor config
pub fn create_governor_config(
    config: &RateLimitConfig,
) -> Result<Arc<DefaultGovernorConfig>, InvalidRateLimit> {
    GovernorConfigBuilder::default()
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers()
        .finish()
        .map(Arc::new)
        .ok_or(InvalidRateLimit)
}

/// Build the layer and start the background task that purges idle keys
pub fn rate_limit_layer(config: &RateLimitConfig) -> Result<RateLimitLayer, InvalidRateLimit> {
    let governor = create_governor_config(config)?;

    let limiter = governor.limiter().clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            debug!("Rate limiting storage size: {}", limiter.len());
            limiter.retain_recent();
        }
    });

    Ok(GovernorLayer { config: governor })
}
