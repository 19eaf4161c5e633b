//! Request and Response models for the proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query parameters and serializing shaped responses.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AreaFilterParams, CategoryFilterParams, LookupParams, SearchParams};
pub use responses::HealthResponse;
