//! Durable Cache Tier
//!
//! Redis-backed second cache tier. The tier is advisory: connection is
//! attempted once at startup with a bounded timeout, and every operation
//! is wrapped so failures degrade to "tier absent" rather than failing
//! the request that triggered them.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::timeout;
use tracing::warn;

use ::redis::{aio::MultiplexedConnection, AsyncCommands, Client};

use crate::error::{ProxyError, Result};

// == Durable Tier Trait ==
/// Get/put capability of a shared cache backend.
///
/// The coordinator only depends on this trait, so backends can be swapped
/// and the fallback chain exercised with in-memory fakes.
#[async_trait]
pub trait DurableTier: Send + Sync {
    /// Fetches a stored payload. `Ok(None)` means the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores a payload with an expiry in whole seconds.
    async fn put(&self, key: &str, value: &Value, ttl_secs: u64) -> Result<()>;
}

// == Redis Tier ==
/// Redis implementation of the durable tier.
///
/// Holds a multiplexed connection that is cloned per operation; each
/// operation carries an independent timeout budget.
pub struct RedisTier {
    conn: MultiplexedConnection,
    op_timeout: Duration,
}

impl RedisTier {
    // == Connect ==
    /// Opens a connection to the given Redis URL.
    ///
    /// Fails if the URL is invalid or the connection cannot be established
    /// within `connect_timeout`. The caller decides whether that failure
    /// disables the tier or aborts startup.
    pub async fn connect(
        url: &str,
        connect_timeout: Duration,
        op_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = timeout(connect_timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| ProxyError::CacheTierTimeout)??;

        Ok(Self { conn, op_timeout })
    }
}

#[async_trait]
impl DurableTier for RedisTier {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = timeout(self.op_timeout, conn.get(key))
            .await
            .map_err(|_| ProxyError::CacheTierTimeout)??;

        match raw {
            None => Ok(None),
            Some(text) => match serde_json::from_str(&text) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    // A corrupt stored payload counts as a miss
                    warn!(key, error = %err, "discarding unparseable durable cache payload");
                    Ok(None)
                }
            },
        }
    }

    async fn put(&self, key: &str, value: &Value, ttl_secs: u64) -> Result<()> {
        let payload = value.to_string();
        let mut conn = self.conn.clone();
        let _: () = timeout(self.op_timeout, conn.set_ex(key, payload, ttl_secs))
            .await
            .map_err(|_| ProxyError::CacheTierTimeout)??;

        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_invalid_url() {
        let result = RedisTier::connect(
            "not a redis url",
            Duration::from_millis(200),
            Duration::from_millis(200),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_unreachable_host() {
        // Nothing listens on this port; the error shape depends on whether
        // the connect is refused or times out, but it must not hang
        let result = RedisTier::connect(
            "redis://127.0.0.1:1",
            Duration::from_millis(500),
            Duration::from_millis(200),
        )
        .await;

        assert!(result.is_err());
    }
}
