//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default base URL of the recipe data provider.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Cache entry TTL in milliseconds (applies to both tiers)
    pub cache_ttl_ms: u64,
    /// Maximum number of entries the local cache can hold
    pub max_cache_size: usize,
    /// Durable cache tier connection URL, None disables the tier
    pub redis_url: Option<String>,
    /// Opt-out flag for the durable tier
    pub redis_enabled: bool,
    /// Base URL of the upstream recipe provider
    pub upstream_base_url: String,
    /// Upstream fetch timeout in seconds
    pub upstream_timeout_secs: u64,
    /// Durable tier connection timeout in seconds
    pub redis_connect_timeout_secs: u64,
    /// Durable tier per-operation timeout in seconds
    pub redis_op_timeout_secs: u64,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 5176)
    /// - `CACHE_TTL` - Entry TTL in milliseconds (default: 300000)
    /// - `MAX_CACHE_SIZE` - Local cache capacity (default: 1000)
    /// - `REDIS_URL` - Durable tier URL (unset disables the tier)
    /// - `REDIS_ENABLED` - Set to "false" or "0" to disable the durable tier
    /// - `UPSTREAM_BASE_URL` - Recipe provider base URL
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream fetch budget (default: 10)
    /// - `REDIS_CONNECT_TIMEOUT_SECS` - Durable tier connect budget (default: 5)
    /// - `REDIS_OP_TIMEOUT_SECS` - Durable tier operation budget (default: 2)
    /// - `CLEANUP_INTERVAL_SECS` - Expiry sweep frequency (default: 60)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5176),
            cache_ttl_ms: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300_000),
            max_cache_size: env::var("MAX_CACHE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            redis_enabled: parse_flag(env::var("REDIS_ENABLED").ok()),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            redis_connect_timeout_secs: env::var("REDIS_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            redis_op_timeout_secs: env::var("REDIS_OP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            cleanup_interval_secs: env::var("CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Returns the durable tier URL when the tier is configured and enabled.
    pub fn active_redis_url(&self) -> Option<&str> {
        if self.redis_enabled {
            self.redis_url.as_deref()
        } else {
            None
        }
    }

    /// TTL for durable tier writes, in whole seconds.
    ///
    /// Derived from the millisecond TTL by flooring, with a minimum of one
    /// second so short TTLs never round down to "no expiry".
    pub fn durable_ttl_secs(&self) -> u64 {
        (self.cache_ttl_ms / 1000).max(1)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn redis_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_connect_timeout_secs)
    }

    pub fn redis_op_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_op_timeout_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5176,
            cache_ttl_ms: 300_000,
            max_cache_size: 1000,
            redis_url: None,
            redis_enabled: true,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout_secs: 10,
            redis_connect_timeout_secs: 5,
            redis_op_timeout_secs: 2,
            cleanup_interval_secs: 60,
        }
    }
}

/// Parses an opt-out flag: only an explicit "false" or "0" disables.
fn parse_flag(value: Option<String>) -> bool {
    match value.as_deref() {
        Some("false") | Some("0") => false,
        _ => true,
    }
}
