//! Cache Key Namespace
//!
//! Builds the cache key for each logical query. Keys are partitioned by
//! operation prefix so distinct query types can never collide, and query
//! parameters are normalized (trimmed, lowercased) so equivalent requests
//! share an entry. Lookup ids are trimmed but kept verbatim otherwise.

use chrono::{DateTime, Utc};

/// Bucket format for the random-meal key, UTC with minute precision.
///
/// Calls inside the same UTC minute share a key and may hit; calls in
/// different minutes are guaranteed a fresh fetch.
const RANDOM_BUCKET_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Key for a name search.
pub fn search(term: &str) -> String {
    format!("search:{}", normalize(term))
}

/// Key for the full category listing.
pub fn categories() -> String {
    "categories:all".to_string()
}

/// Key for a filter-by-category query.
pub fn filter_by_category(category: &str) -> String {
    format!("filter:{}", normalize(category))
}

/// Key for the full area listing.
pub fn areas() -> String {
    "areas:all".to_string()
}

/// Key for a filter-by-area query.
pub fn filter_by_area(area: &str) -> String {
    format!("filterArea:{}", normalize(area))
}

/// Key for a lookup by meal id.
pub fn lookup(id: &str) -> String {
    format!("lookup:{}", id.trim())
}

/// Key for a random meal at the given instant.
pub fn random_at(when: DateTime<Utc>) -> String {
    format!("random:{}", when.format(RANDOM_BUCKET_FORMAT))
}

/// Key for a random meal in the current time bucket.
pub fn random() -> String {
    random_at(Utc::now())
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
