//! API Handlers
//!
//! One handler per proxied query endpoint, plus the health report. Each
//! query handler normalizes its parameter, builds the cache key, and
//! resolves through the cache coordinator; the upstream JSON body is
//! passed through untouched with an `X-Cache` outcome header.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::cache::{keys, CacheOutcome, TieredCache};
use crate::error::Result;
use crate::models::{
    AreaFilterParams, CategoryFilterParams, HealthResponse, LookupParams, SearchParams,
};
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Two-tier cache coordinator
    pub cache: Arc<TieredCache>,
    /// Upstream provider client
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    /// Creates a new AppState from an assembled cache and upstream client.
    pub fn new(cache: TieredCache, upstream: UpstreamClient) -> Self {
        Self {
            cache: Arc::new(cache),
            upstream: Arc::new(upstream),
        }
    }
}

/// Attaches the cache outcome header to a passthrough payload.
fn cached_json(value: Value, outcome: CacheOutcome) -> impl IntoResponse {
    ([("x-cache", outcome.as_header_value())], Json(value))
}

/// Handler for GET /api/search?s=
///
/// The search term is trimmed once; the cache key lowercases it so
/// `Arrabiata` and `arrabiata` share an entry, while the upstream sees
/// the original casing.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse> {
    let term = params.term().trim().to_string();
    let key = keys::search(&term);
    let upstream = Arc::clone(&state.upstream);

    let (value, outcome) = state
        .cache
        .resolve(&key, move || async move { upstream.search(&term).await })
        .await?;

    Ok(cached_json(value, outcome))
}

/// Handler for GET /api/categories
pub async fn categories_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let key = keys::categories();
    let upstream = Arc::clone(&state.upstream);

    let (value, outcome) = state
        .cache
        .resolve(&key, move || async move { upstream.categories().await })
        .await?;

    Ok(cached_json(value, outcome))
}

/// Handler for GET /api/filter?c=
pub async fn filter_by_category_handler(
    State(state): State<AppState>,
    Query(params): Query<CategoryFilterParams>,
) -> Result<impl IntoResponse> {
    let category = params.category().trim().to_string();
    let key = keys::filter_by_category(&category);
    let upstream = Arc::clone(&state.upstream);

    let (value, outcome) = state
        .cache
        .resolve(&key, move || async move {
            upstream.filter_by_category(&category).await
        })
        .await?;

    Ok(cached_json(value, outcome))
}

/// Handler for GET /api/areas
pub async fn areas_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let key = keys::areas();
    let upstream = Arc::clone(&state.upstream);

    let (value, outcome) = state
        .cache
        .resolve(&key, move || async move { upstream.areas().await })
        .await?;

    Ok(cached_json(value, outcome))
}

/// Handler for GET /api/filterByArea?a=
pub async fn filter_by_area_handler(
    State(state): State<AppState>,
    Query(params): Query<AreaFilterParams>,
) -> Result<impl IntoResponse> {
    let area = params.area().trim().to_string();
    let key = keys::filter_by_area(&area);
    let upstream = Arc::clone(&state.upstream);

    let (value, outcome) = state
        .cache
        .resolve(&key, move || async move {
            upstream.filter_by_area(&area).await
        })
        .await?;

    Ok(cached_json(value, outcome))
}

/// Handler for GET /api/random
///
/// The key is time-bucketed to the current UTC minute, so calls inside
/// one minute may share a cached meal and the next minute always fetches
/// fresh randomness.
pub async fn random_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let key = keys::random();
    let upstream = Arc::clone(&state.upstream);

    let (value, outcome) = state
        .cache
        .resolve(&key, move || async move { upstream.random().await })
        .await?;

    Ok(cached_json(value, outcome))
}

/// Handler for GET /api/lookup?i=
pub async fn lookup_handler(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<impl IntoResponse> {
    let id = params.id().trim().to_string();
    let key = keys::lookup(&id);
    let upstream = Arc::clone(&state.upstream);

    let (value, outcome) = state
        .cache
        .resolve(&key, move || async move { upstream.lookup(&id).await })
        .await?;

    Ok(cached_json(value, outcome))
}

/// Handler for GET /api/health
///
/// Reads counters and tier state without touching the cache or upstream.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::new(
        state.cache.local_len().await,
        state.cache.durable_attached(),
        state.cache.hits(),
        state.cache.misses(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LocalCache;
    use std::time::Duration;
    use tokio::sync::RwLock;

    fn test_state() -> AppState {
        let local = Arc::new(RwLock::new(LocalCache::new(100, 300_000)));
        let cache = TieredCache::new(local, None, 300);
        // Nothing listens here; only the error path is reachable
        let upstream =
            UpstreamClient::new("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
        AppState::new(cache, upstream)
    }

    #[tokio::test]
    async fn test_health_handler_initial_state() {
        let state = test_state();

        let Json(health) = health_handler(State(state)).await;
        assert!(health.ok);
        assert_eq!(health.cache_size, 0);
        assert!(!health.using_redis);
        assert_eq!(health.cache_hits, 0);
        assert_eq!(health.cache_misses, 0);
    }

    #[tokio::test]
    async fn test_search_handler_unreachable_upstream_fails() {
        let state = test_state();

        let params = SearchParams {
            s: Some("beef".to_string()),
        };
        let result = search_handler(State(state.clone()), Query(params)).await;

        assert!(result.is_err());
        // The failed fetch still counted as a miss and cached nothing
        assert_eq!(state.cache.misses(), 1);
        assert_eq!(state.cache.local_len().await, 0);
    }

    #[tokio::test]
    async fn test_lookup_handler_unreachable_upstream_fails() {
        let state = test_state();

        let params = LookupParams {
            i: Some("52771".to_string()),
        };
        let result = lookup_handler(State(state), Query(params)).await;
        assert!(result.is_err());
    }
}
