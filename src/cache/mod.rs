//! Cache Module
//!
//! Two-tier caching for upstream query results: an in-process LRU+TTL
//! tier, an optional Redis-backed durable tier, and the coordinator that
//! chains lookups across them.

mod counters;
mod entry;
pub mod keys;
mod lru;
mod redis;
mod store;
mod tiered;


// Re-export public types
pub use counters::CacheCounters;
pub use entry::CacheEntry;
pub use lru::LruQueue;
pub use redis::{DurableTier, RedisTier};
pub use store::LocalCache;
pub use tiered::{CacheOutcome, TieredCache};
