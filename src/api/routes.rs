//! API Routes
//!
//! Configures the Axum router with the proxied query endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    areas_handler, categories_handler, filter_by_area_handler, filter_by_category_handler,
    health_handler, lookup_handler, random_handler, search_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/search?s=` - Search meals by name
/// - `GET /api/categories` - List all categories
/// - `GET /api/filter?c=` - Meals in a category
/// - `GET /api/areas` - List all areas
/// - `GET /api/filterByArea?a=` - Meals from an area
/// - `GET /api/random` - One random meal
/// - `GET /api/lookup?i=` - Meal by id
/// - `GET /api/health` - Counters and tier state
///
/// # Middleware
/// - CORS: Allows any origin (the browser client runs on another port in dev)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/api/search", get(search_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/filter", get(filter_by_category_handler))
        .route("/api/areas", get(areas_handler))
        .route("/api/filterByArea", get(filter_by_area_handler))
        .route("/api/random", get(random_handler))
        .route("/api/lookup", get(lookup_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
