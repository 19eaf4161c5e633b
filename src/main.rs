//! Mealproxy - caching proxy for TheMealDB
//!
//! Serves the recipe browser's queries through a two-tier cache in front
//! of the upstream provider.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mealproxy::api::{create_router, AppState};
use mealproxy::cache::{DurableTier, LocalCache, RedisTier, TieredCache};
use mealproxy::config::Config;
use mealproxy::tasks::spawn_expiry_sweeper;
use mealproxy::upstream::UpstreamClient;

/// Main entry point for the caching proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Attempt the durable tier connection (failure disables the tier)
/// 4. Assemble the local cache, coordinator, and upstream client
/// 5. Start the background expiry sweeper
/// 6. Start the HTTP server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealproxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting mealproxy");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_ttl={}ms, max_cache_size={}, upstream={}",
        config.server_port, config.cache_ttl_ms, config.max_cache_size, config.upstream_base_url
    );

    // Durable tier is optional; a failed connection leaves it off for
    // the process lifetime
    let durable: Option<Arc<dyn DurableTier>> = match config.active_redis_url() {
        Some(url) => {
            match RedisTier::connect(
                url,
                config.redis_connect_timeout(),
                config.redis_op_timeout(),
            )
            .await
            {
                Ok(tier) => {
                    info!(url, "durable cache tier connected");
                    Some(Arc::new(tier))
                }
                Err(err) => {
                    warn!(url, error = %err, "durable cache unavailable, continuing with local tier only");
                    None
                }
            }
        }
        None => {
            info!("durable cache tier not configured");
            None
        }
    };

    // Assemble cache tiers and upstream client
    let local = Arc::new(RwLock::new(LocalCache::new(
        config.max_cache_size,
        config.cache_ttl_ms,
    )));
    let cache = TieredCache::new(Arc::clone(&local), durable, config.durable_ttl_secs());
    let upstream = UpstreamClient::new(&config.upstream_base_url, config.upstream_timeout())
        .context("failed to build upstream client")?;
    let state = AppState::new(cache, upstream);

    // Start background expiry sweeper
    let sweeper_handle = spawn_expiry_sweeper(Arc::clone(&local), config.cleanup_interval());

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper task and allows graceful shutdown.
async fn shutdown_signal(sweeper_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the sweeper task
    sweeper_handle.abort();
    warn!("Expiry sweeper aborted");
}
