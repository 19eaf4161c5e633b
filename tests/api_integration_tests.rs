//! Integration Tests for the Proxy API
//!
//! Drives the real router end to end against an in-process fake recipe
//! provider, covering cache hits and misses, failure passthrough, key
//! namespaces, and the health report.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::ServiceExt;

use mealproxy::cache::{DurableTier, LocalCache, RedisTier, TieredCache};
use mealproxy::upstream::UpstreamClient;
use mealproxy::{api::create_router, AppState};

// == Fake Upstream Provider ==

/// Per-endpoint request counters for the fake provider.
#[derive(Default)]
struct UpstreamCalls {
    search: AtomicUsize,
    categories: AtomicUsize,
    filter: AtomicUsize,
    list: AtomicUsize,
    random: AtomicUsize,
    lookup: AtomicUsize,
}

async fn fake_search(
    State(calls): State<Arc<UpstreamCalls>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    calls.search.fetch_add(1, Ordering::Relaxed);
    let term = params.get("s").cloned().unwrap_or_default();
    Json(json!({"meals": [{"idMeal": "52771", "strMeal": format!("Spicy {}", term)}]}))
}

async fn fake_categories(State(calls): State<Arc<UpstreamCalls>>) -> Json<Value> {
    calls.categories.fetch_add(1, Ordering::Relaxed);
    Json(json!({
        "categories": [
            {"idCategory": "1", "strCategory": "Beef"},
            {"idCategory": "3", "strCategory": "Dessert"},
        ]
    }))
}

async fn fake_filter(
    State(calls): State<Arc<UpstreamCalls>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    calls.filter.fetch_add(1, Ordering::Relaxed);
    // The provider multiplexes category and area filters on one path
    let selector = params
        .get("c")
        .map(|c| format!("category:{}", c))
        .or_else(|| params.get("a").map(|a| format!("area:{}", a)))
        .unwrap_or_default();
    Json(json!({"meals": [{"idMeal": "52959", "strMeal": selector}]}))
}

async fn fake_list(State(calls): State<Arc<UpstreamCalls>>) -> Json<Value> {
    calls.list.fetch_add(1, Ordering::Relaxed);
    Json(json!({"meals": [{"strArea": "American"}, {"strArea": "British"}]}))
}

async fn fake_random(State(calls): State<Arc<UpstreamCalls>>) -> Json<Value> {
    calls.random.fetch_add(1, Ordering::Relaxed);
    Json(json!({"meals": [{"idMeal": "53000", "strMeal": "Roulette Stew"}]}))
}

async fn fake_lookup(
    State(calls): State<Arc<UpstreamCalls>>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    calls.lookup.fetch_add(1, Ordering::Relaxed);
    let id = params.get("i").cloned().unwrap_or_default();
    if id == "999999" {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    } else {
        Json(json!({"meals": [{"idMeal": id, "strMeal": "Corba"}]})).into_response()
    }
}

/// Binds the fake provider on an ephemeral port and returns its base URL
/// plus the shared call counters.
async fn spawn_fake_upstream() -> (String, Arc<UpstreamCalls>) {
    let calls = Arc::new(UpstreamCalls::default());

    let provider = Router::new()
        .route("/search.php", get(fake_search))
        .route("/categories.php", get(fake_categories))
        .route("/filter.php", get(fake_filter))
        .route("/list.php", get(fake_list))
        .route("/random.php", get(fake_random))
        .route("/lookup.php", get(fake_lookup))
        .with_state(Arc::clone(&calls));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, provider).await.unwrap();
    });

    (format!("http://{}", addr), calls)
}

// == Helper Functions ==

fn create_test_app(base_url: &str) -> Router {
    let local = Arc::new(RwLock::new(LocalCache::new(100, 300_000)));
    let cache = TieredCache::new(local, None, 300);
    let upstream = UpstreamClient::new(base_url, Duration::from_secs(5)).unwrap();
    create_router(AppState::new(cache, upstream))
}

async fn get_response(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn x_cache(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get("x-cache")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

// == Cache Behavior Tests ==

#[tokio::test]
async fn test_repeat_query_served_from_cache() {
    let (base_url, calls) = spawn_fake_upstream().await;
    let app = create_test_app(&base_url);

    let first = get_response(&app, "/api/categories").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(x_cache(&first), "MISS");
    let first_body = body_to_json(first.into_body()).await;

    let second = get_response(&app, "/api/categories").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(x_cache(&second), "HIT");
    let second_body = body_to_json(second.into_body()).await;

    assert_eq!(first_body, second_body);
    assert_eq!(calls.categories.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_search_cache_key_is_case_insensitive() {
    let (base_url, calls) = spawn_fake_upstream().await;
    let app = create_test_app(&base_url);

    let first = get_response(&app, "/api/search?s=Arrabiata").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(x_cache(&first), "MISS");
    let first_body = body_to_json(first.into_body()).await;
    // The upstream saw the original casing, only the key was lowercased
    assert_eq!(
        first_body["meals"][0]["strMeal"].as_str().unwrap(),
        "Spicy Arrabiata"
    );

    let second = get_response(&app, "/api/search?s=arrabiata").await;
    assert_eq!(x_cache(&second), "HIT");
    let second_body = body_to_json(second.into_body()).await;
    assert_eq!(
        second_body["meals"][0]["strMeal"].as_str().unwrap(),
        "Spicy Arrabiata"
    );

    // Surrounding whitespace folds into the same entry as well
    let third = get_response(&app, "/api/search?s=%20%20ARRABIATA%20%20").await;
    assert_eq!(x_cache(&third), "HIT");

    assert_eq!(calls.search.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_distinct_search_terms_fetch_separately() {
    let (base_url, calls) = spawn_fake_upstream().await;
    let app = create_test_app(&base_url);

    let beef = get_response(&app, "/api/search?s=beef").await;
    assert_eq!(x_cache(&beef), "MISS");

    let chicken = get_response(&app, "/api/search?s=chicken").await;
    assert_eq!(x_cache(&chicken), "MISS");

    assert_eq!(calls.search.load(Ordering::Relaxed), 2);
}

#[tokio::test]
async fn test_search_without_parameter_still_proxies() {
    let (base_url, calls) = spawn_fake_upstream().await;
    let app = create_test_app(&base_url);

    let response = get_response(&app, "/api/search").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(x_cache(&response), "MISS");
    assert_eq!(calls.search.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_areas_and_random_endpoints_proxy() {
    let (base_url, calls) = spawn_fake_upstream().await;
    let app = create_test_app(&base_url);

    let areas = get_response(&app, "/api/areas").await;
    assert_eq!(areas.status(), StatusCode::OK);
    assert_eq!(x_cache(&areas), "MISS");
    let areas_body = body_to_json(areas.into_body()).await;
    assert_eq!(areas_body["meals"].as_array().unwrap().len(), 2);

    let areas_again = get_response(&app, "/api/areas").await;
    assert_eq!(x_cache(&areas_again), "HIT");
    assert_eq!(calls.list.load(Ordering::Relaxed), 1);

    // Random is bucketed by minute, so only assert the first call here
    let random = get_response(&app, "/api/random").await;
    assert_eq!(random.status(), StatusCode::OK);
    assert_eq!(x_cache(&random), "MISS");
    assert_eq!(calls.random.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_lookup_caches_by_id() {
    let (base_url, calls) = spawn_fake_upstream().await;
    let app = create_test_app(&base_url);

    let first = get_response(&app, "/api/lookup?i=52772").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(x_cache(&first), "MISS");
    let first_body = body_to_json(first.into_body()).await;
    assert_eq!(first_body["meals"][0]["idMeal"].as_str().unwrap(), "52772");

    let second = get_response(&app, "/api/lookup?i=52772").await;
    assert_eq!(x_cache(&second), "HIT");

    assert_eq!(calls.lookup.load(Ordering::Relaxed), 1);
}

// == Failure Passthrough Tests ==

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway_and_uncached() {
    let (base_url, calls) = spawn_fake_upstream().await;
    let app = create_test_app(&base_url);

    // The fake provider returns 500 for this id
    let first = get_response(&app, "/api/lookup?i=999999").await;
    assert_eq!(first.status(), StatusCode::BAD_GATEWAY);
    let first_body = body_to_json(first.into_body()).await;
    assert_eq!(first_body, json!({"error": "Bad gateway"}));

    // A failure is never cached, the retry reaches the upstream again
    let second = get_response(&app, "/api/lookup?i=999999").await;
    assert_eq!(second.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(calls.lookup.load(Ordering::Relaxed), 2);
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    // Nothing listens on this port
    let app = create_test_app("http://127.0.0.1:1");

    let response = get_response(&app, "/api/categories").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body, json!({"error": "Bad gateway"}));

    // The failed fetch counted as a miss and cached nothing
    let health = get_response(&app, "/api/health").await;
    let health_body = body_to_json(health.into_body()).await;
    assert_eq!(health_body["cacheMisses"].as_u64().unwrap(), 1);
    assert_eq!(health_body["cacheSize"].as_u64().unwrap(), 0);
}

// == Key Namespace Tests ==

#[tokio::test]
async fn test_category_and_area_filters_do_not_collide() {
    let (base_url, calls) = spawn_fake_upstream().await;
    let app = create_test_app(&base_url);

    let by_category = get_response(&app, "/api/filter?c=Seafood").await;
    assert_eq!(x_cache(&by_category), "MISS");
    let category_body = body_to_json(by_category.into_body()).await;
    assert_eq!(
        category_body["meals"][0]["strMeal"].as_str().unwrap(),
        "category:Seafood"
    );

    // Same raw value through the area filter must miss independently
    let by_area = get_response(&app, "/api/filterByArea?a=Seafood").await;
    assert_eq!(x_cache(&by_area), "MISS");
    let area_body = body_to_json(by_area.into_body()).await;
    assert_eq!(
        area_body["meals"][0]["strMeal"].as_str().unwrap(),
        "area:Seafood"
    );

    assert_eq!(calls.filter.load(Ordering::Relaxed), 2);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_reports_counters_and_tier() {
    let (base_url, _calls) = spawn_fake_upstream().await;
    let app = create_test_app(&base_url);

    // One miss plus one hit on categories, one more miss on search
    let _ = get_response(&app, "/api/categories").await;
    let _ = get_response(&app, "/api/categories").await;
    let _ = get_response(&app, "/api/search?s=beef").await;

    let response = get_response(&app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-cache").is_none());

    let body = body_to_json(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "ok": true,
            "cacheSize": 2,
            "usingRedis": false,
            "cacheHits": 1,
            "cacheMisses": 2,
        })
    );
}

#[tokio::test]
async fn test_unreachable_durable_tier_degrades_to_local_only() {
    let (base_url, calls) = spawn_fake_upstream().await;

    // Mirror startup wiring: a failed tier connection leaves the tier off
    let durable: Option<Arc<dyn DurableTier>> = match RedisTier::connect(
        "redis://127.0.0.1:1",
        Duration::from_millis(300),
        Duration::from_millis(200),
    )
    .await
    {
        Ok(tier) => Some(Arc::new(tier)),
        Err(_) => None,
    };
    assert!(durable.is_none(), "nothing listens on port 1");

    let local = Arc::new(RwLock::new(LocalCache::new(100, 300_000)));
    let cache = TieredCache::new(local, durable, 300);
    let upstream = UpstreamClient::new(&base_url, Duration::from_secs(5)).unwrap();
    let app = create_router(AppState::new(cache, upstream));

    // Caching works exactly as it does with no durable tier configured
    let first = get_response(&app, "/api/categories").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(x_cache(&first), "MISS");
    let second = get_response(&app, "/api/categories").await;
    assert_eq!(x_cache(&second), "HIT");
    assert_eq!(calls.categories.load(Ordering::Relaxed), 1);

    let health = get_response(&app, "/api/health").await;
    let health_body = body_to_json(health.into_body()).await;
    assert_eq!(health_body["usingRedis"], json!(false));
}

#[tokio::test]
async fn test_unknown_route_returns_not_found() {
    let (base_url, _calls) = spawn_fake_upstream().await;
    let app = create_test_app(&base_url);

    let response = get_response(&app, "/api/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
