//! LRU Queue Module
//!
//! Tracks key recency for least-recently-used eviction.

use std::collections::VecDeque;

// == LRU Queue ==
/// Recency order for cache keys.
///
/// Keys are stored in a VecDeque where:
/// - Front = Least recently used (next eviction candidate)
/// - Back = Most recently used
#[derive(Debug, Default)]
pub struct LruQueue {
    /// Keys ordered from coldest to hottest
    order: VecDeque<String>,
}

impl LruQueue {
    // == Constructor ==
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// An existing key is moved to the back; a new key is appended.
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Drops a key from the queue, if tracked.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop LRU ==
    /// Returns and removes the least recently used key.
    pub fn pop_lru(&mut self) -> Option<String> {
        self.order.pop_front()
    }
}
