//! Cache Coordinator Module
//!
//! Orchestrates lookups across the durable and local cache tiers and the
//! fallback to the upstream on a full miss.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheCounters, DurableTier, LocalCache};
use crate::error::Result;

// == Cache Outcome ==
/// Whether a resolved lookup was served from cache or fetched upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Served from either cache tier
    Hit,
    /// Fetched from the upstream provider
    Miss,
}

impl CacheOutcome {
    /// Value for the `X-Cache` response header.
    pub fn as_header_value(&self) -> &'static str {
        match self {
            CacheOutcome::Hit => "HIT",
            CacheOutcome::Miss => "MISS",
        }
    }
}

// == Tiered Cache ==
/// Two-tier cache coordinator.
///
/// Lookup order: durable tier, then local tier, then the caller-supplied
/// fetch. Durable tier failures are logged and treated as a miss for that
/// tier only; a fetch failure propagates to the caller uncached.
pub struct TieredCache {
    /// First tier, shared with the background expiry sweeper
    local: Arc<RwLock<LocalCache>>,
    /// Optional second tier; None means the tier never connected
    durable: Option<Arc<dyn DurableTier>>,
    /// Process-wide hit/miss counters
    counters: CacheCounters,
    /// Expiry passed to durable tier writes, in whole seconds
    durable_ttl_secs: u64,
}

impl TieredCache {
    // == Constructor ==
    /// Creates a coordinator over an existing local tier.
    pub fn new(
        local: Arc<RwLock<LocalCache>>,
        durable: Option<Arc<dyn DurableTier>>,
        durable_ttl_secs: u64,
    ) -> Self {
        Self {
            local,
            durable,
            counters: CacheCounters::new(),
            durable_ttl_secs,
        }
    }

    // == Resolve ==
    /// Resolves a key through the tiers, falling back to `fetch`.
    ///
    /// 1. Durable tier get, when attached. Errors are logged and degrade
    ///    to a tier miss; a present value is returned without touching
    ///    the local tier.
    /// 2. Local tier get.
    /// 3. Full miss: the miss is counted, `fetch` runs, and its failure
    ///    propagates unchanged. A fetched value is written to the local
    ///    tier before returning and to the durable tier as a detached
    ///    best-effort task.
    pub async fn resolve<F, Fut>(&self, key: &str, fetch: F) -> Result<(Value, CacheOutcome)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        if let Some(durable) = &self.durable {
            match durable.get(key).await {
                Ok(Some(value)) => {
                    self.counters.record_hit();
                    debug!(key, "durable cache hit");
                    return Ok((value, CacheOutcome::Hit));
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(key, error = %err, "durable cache read failed");
                }
            }
        }

        // Write lock: a local hit updates recency order
        if let Some(value) = self.local.write().await.get(key) {
            self.counters.record_hit();
            debug!(key, "local cache hit");
            return Ok((value, CacheOutcome::Hit));
        }

        self.counters.record_miss();
        debug!(key, "cache miss, fetching upstream");
        let value = fetch().await?;

        self.local
            .write()
            .await
            .insert(key.to_string(), value.clone());

        if let Some(durable) = &self.durable {
            let durable = Arc::clone(durable);
            let key = key.to_string();
            let payload = value.clone();
            let ttl_secs = self.durable_ttl_secs;
            tokio::spawn(async move {
                if let Err(err) = durable.put(&key, &payload, ttl_secs).await {
                    warn!(key = %key, error = %err, "durable cache write failed");
                }
            });
        }

        Ok((value, CacheOutcome::Miss))
    }

    // == Accessors ==
    pub fn hits(&self) -> u64 {
        self.counters.hits()
    }

    pub fn misses(&self) -> u64 {
        self.counters.misses()
    }

    /// Current entry count of the local tier.
    pub async fn local_len(&self) -> usize {
        self.local.read().await.len()
    }

    /// True when the durable tier connected at startup.
    pub fn durable_attached(&self) -> bool {
        self.durable.is_some()
    }
}
