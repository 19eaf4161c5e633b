//! API Module
//!
//! HTTP handlers and routing for the proxied query endpoints.
//!
//! # Endpoints
//! - `GET /api/search?s=` - Search meals by name
//! - `GET /api/categories` - List all categories
//! - `GET /api/filter?c=` - Meals in a category
//! - `GET /api/areas` - List all areas
//! - `GET /api/filterByArea?a=` - Meals from an area
//! - `GET /api/random` - One random meal
//! - `GET /api/lookup?i=` - Meal by id
//! - `GET /api/health` - Counters and tier state

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
