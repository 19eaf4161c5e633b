//! Local Cache Module
//!
//! In-process cache tier combining HashMap storage with LRU eviction and
//! TTL expiration.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, LruQueue};

// == Local Cache ==
/// Capacity-and-TTL-bounded key/value store, the first cache tier.
///
/// A miss here is not an error: the coordinator decides what a miss means.
/// Expired entries are purged lazily on access; the background sweeper
/// only bounds memory between accesses.
#[derive(Debug)]
pub struct LocalCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Recency order for eviction
    lru: LruQueue,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Entry TTL in milliseconds
    ttl_ms: u64,
    /// Entries dropped by the capacity bound
    evictions: u64,
}

impl LocalCache {
    // == Constructor ==
    /// Creates a new LocalCache with the given capacity and TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `ttl_ms` - Entry TTL in milliseconds
    pub fn new(max_entries: usize, ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruQueue::new(),
            max_entries,
            ttl_ms,
            evictions: 0,
        }
    }

    // == Get ==
    /// Returns the value for a key if present and not expired.
    ///
    /// A live entry is promoted to most recently used. An expired entry is
    /// removed on the spot and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key)?;

        if entry.is_expired() {
            self.entries.remove(key);
            self.lru.remove(key);
            return None;
        }

        let value = entry.value.clone();
        self.lru.touch(key);
        Some(value)
    }

    // == Insert ==
    /// Stores a value under a key, overwriting any previous entry.
    ///
    /// The new entry carries a fresh TTL. If the insert pushes the cache
    /// past its capacity, least recently used entries are evicted until
    /// the bound holds again.
    pub fn insert(&mut self, key: String, value: Value) {
        let entry = CacheEntry::new(value, self.ttl_ms);
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);

        while self.entries.len() > self.max_entries {
            match self.lru.pop_lru() {
                Some(coldest) => {
                    self.entries.remove(&coldest);
                    self.evictions += 1;
                    debug!(key = %coldest, "evicted least recently used entry");
                }
                None => break,
            }
        }
    }

    // == Sweep Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.lru.remove(&key);
        }

        count
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries evicted by the capacity bound.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}
