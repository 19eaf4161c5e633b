//! Request DTOs for the proxy API
//!
//! Query-string parameters for the proxied endpoints. A missing parameter
//! is treated as empty, matching the upstream provider's behavior of
//! answering empty queries with a null result set instead of an error.

use serde::Deserialize;

/// Query parameters for `GET /api/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Search term
    #[serde(default)]
    pub s: Option<String>,
}

impl SearchParams {
    pub fn term(&self) -> &str {
        self.s.as_deref().unwrap_or("")
    }
}

/// Query parameters for `GET /api/filter`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFilterParams {
    /// Category name
    #[serde(default)]
    pub c: Option<String>,
}

impl CategoryFilterParams {
    pub fn category(&self) -> &str {
        self.c.as_deref().unwrap_or("")
    }
}

/// Query parameters for `GET /api/filterByArea`
#[derive(Debug, Clone, Deserialize)]
pub struct AreaFilterParams {
    /// Area name
    #[serde(default)]
    pub a: Option<String>,
}

impl AreaFilterParams {
    pub fn area(&self) -> &str {
        self.a.as_deref().unwrap_or("")
    }
}

/// Query parameters for `GET /api/lookup`
#[derive(Debug, Clone, Deserialize)]
pub struct LookupParams {
    /// Meal id
    #[serde(default)]
    pub i: Option<String>,
}

impl LookupParams {
    pub fn id(&self) -> &str {
        self.i.as_deref().unwrap_or("")
    }
}
