//! Per-client request limiting
//!
//! Two keyed limiters: a global cap for the whole service and a stricter
//! one for the places endpoint, both keyed by client IP.

use super::state::AppState;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use serde_json::json;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::time::Duration;

/// Global cap: 100 requests per 15 minutes per client
const GLOBAL_BURST: u32 = 100;
const GLOBAL_REPLENISH_SECS: u64 = 9;

/// Places cap: 20 requests per minute per client
const PLACES_BURST: u32 = 20;
const PLACES_REPLENISH_SECS: u64 = 3;

type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Keyed limiters shared through [`AppState`]
pub struct RateLimits {
    global: KeyedLimiter,
    places: KeyedLimiter,
}

impl RateLimits {
    pub fn new() -> Self {
        Self {
            global: RateLimiter::keyed(quota(GLOBAL_REPLENISH_SECS, GLOBAL_BURST)),
            places: RateLimiter::keyed(quota(PLACES_REPLENISH_SECS, PLACES_BURST)),
        }
    }

    /// Whether the client may pass the global limiter
    pub fn check_global(&self, ip: IpAddr) -> bool {
        self.global.check_key(&ip).is_ok()
    }

    /// Whether the client may pass the places limiter
    pub fn check_places(&self, ip: IpAddr) -> bool {
        self.places.check_key(&ip).is_ok()
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        Self::new()
    }
}

/// One token per `replenish_secs`, bursting to the window maximum
fn quota(replenish_secs: u64, burst: u32) -> Quota {
    Quota::with_period(Duration::from_secs(replenish_secs))
        .expect("nonzero replenish period")
        .allow_burst(NonZeroU32::new(burst).expect("nonzero burst"))
}

/// Service-wide limiter applied to every route
pub async fn global_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if !state.limits.check_global(addr.ip()) {
        return too_many_requests();
    }
    next.run(request).await
}

/// Stricter limiter for the places endpoint
pub async fn places_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if !state.limits.check_places(addr.ip()) {
        return too_many_requests();
    }
    next.run(request).await
}

fn too_many_requests() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({ "error": "Too many requests, please try again later" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([127, 0, 0, last])
    }

    #[test]
    fn test_places_limiter_exhausts_after_burst() {
        let limits = RateLimits::new();
        for _ in 0..PLACES_BURST {
            assert!(limits.check_places(ip(1)));
        }
        assert!(!limits.check_places(ip(1)));
    }

    #[test]
    fn test_limiters_are_keyed_per_client() {
        let limits = RateLimits::new();
        for _ in 0..PLACES_BURST {
            assert!(limits.check_places(ip(2)));
        }
        assert!(!limits.check_places(ip(2)));
        assert!(limits.check_places(ip(3)));
    }

    #[test]
    fn test_global_and_places_limits_are_independent() {
        let limits = RateLimits::new();
        for _ in 0..PLACES_BURST {
            assert!(limits.check_places(ip(4)));
        }
        assert!(!limits.check_places(ip(4)));
        assert!(limits.check_global(ip(4)));
    }
}
