//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired local cache entries.
//! Lazy purge on access keeps lookups correct; the sweeper only bounds
//! memory held by entries nobody asks for anymore.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LocalCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the given interval
/// between sweeps. An empty cache is detected under a read lock and the
/// sweep is skipped; otherwise the sweep holds a write lock on the local
/// cache for its duration.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_expiry_sweeper(cache: Arc<RwLock<LocalCache>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(?interval, "starting expiry sweeper");

        loop {
            tokio::time::sleep(interval).await;

            if cache.read().await.is_empty() {
                debug!("expiry sweep skipped, cache empty");
                continue;
            }

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired()
            };

            if removed > 0 {
                info!(removed, "expiry sweep removed entries");
            } else {
                debug!("expiry sweep found nothing to remove");
            }
        }
    })
}
