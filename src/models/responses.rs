//! Response DTOs for the proxy API
//!
//! Query endpoints pass the upstream JSON through untouched, so the only
//! shaped response is the health report. Field names are camelCase on the
//! wire for the browser client.

use serde::Serialize;

/// Response body for the health endpoint (GET /api/health)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always true when the process can answer
    pub ok: bool,
    /// Current entry count of the local cache tier
    pub cache_size: usize,
    /// Whether the durable tier connected at startup
    pub using_redis: bool,
    /// Lookups served from either cache tier
    pub cache_hits: u64,
    /// Lookups that fell through to the upstream
    pub cache_misses: u64,
}

impl HealthResponse {
    /// Creates a new HealthResponse from current cache state.
    pub fn new(cache_size: usize, using_redis: bool, cache_hits: u64, cache_misses: u64) -> Self {
        Self {
            ok: true,
            cache_size,
            using_redis,
            cache_hits,
            cache_misses,
        }
    }
}
