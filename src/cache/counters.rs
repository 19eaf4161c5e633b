//! Cache Counters Module
//!
//! Process-wide hit/miss counters for the cache coordinator.

use std::sync::atomic::{AtomicU64, Ordering};

// == Cache Counters ==
/// Monotonic hit/miss counters, reset only on restart.
///
/// One hit or one miss is recorded per resolved lookup: a hit on either
/// tier, or a miss on a full fallthrough to the upstream.
#[derive(Debug, Default)]
pub struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheCounters {
    /// Creates counters starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
