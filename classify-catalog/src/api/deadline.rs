//! Per-request lookup deadline
//!
//! Outbound lookups default to the configured timeout. A caller can shorten
//! it with an `x-request-timeout-ms` header carrying its own remaining
//! budget; it can never be lengthened.

use axum::http::HeaderMap;
use std::time::Duration;

/// Header carrying the caller's remaining time budget in milliseconds
pub const REQUEST_TIMEOUT_HEADER: &str = "x-request-timeout-ms";

/// Timeout for the lookups made while serving one request
pub fn lookup_timeout(headers: &HeaderMap, configured: Duration) -> Duration {
    headers
        .get(REQUEST_TIMEOUT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .filter(|requested| !requested.is_zero())
        .map_or(configured, |requested| requested.min(configured))
}
