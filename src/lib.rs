//! Mealproxy - caching proxy for TheMealDB
//!
//! Sits between the recipe browser and the upstream provider, serving
//! repeated queries from a local LRU+TTL cache backed by an optional
//! Redis tier that degrades silently when unavailable.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{ProxyError, Result};
