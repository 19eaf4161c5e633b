//! Error types for the caching proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

// == Proxy Error Enum ==
/// Unified error type for the caching proxy.
///
/// Cache tier errors are absorbed inside the cache layer and logged; only
/// upstream and transport failures ever reach the HTTP boundary.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Transport failure reaching the upstream provider
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream provider answered with a non-success status
    #[error("Upstream returned status: {0}")]
    Upstream(StatusCode),

    /// Durable cache tier operation failed
    #[error("Cache tier error: {0}")]
    CacheTier(#[from] redis::RedisError),

    /// Durable cache tier operation exceeded its timeout budget
    #[error("Cache tier operation timed out")]
    CacheTierTimeout,
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    /// Collapses every propagated failure to a uniform 502 response.
    ///
    /// The real cause is logged server-side; callers only ever see the
    /// generic gateway error, never internal detail.
    fn into_response(self) -> Response {
        warn!(error = %self, "request failed");

        let body = Json(json!({
            "error": "Bad gateway"
        }));

        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
