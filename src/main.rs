//! kvcache - A key-value cache server
//!
//! Serves the cache REST API over the backend selected in the environment.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kvcache::api::create_router;
use kvcache::{AppState, Cache, CacheBackend, Config, MemoryCache, RedisCache};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct the configured cache backend
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kvcache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting kvcache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, max_entries={}, default_ttl={}s, port={}",
        config.backend, config.max_entries, config.default_ttl, config.server_port
    );

    // Keep a typed handle on the memory backend for the shutdown report
    let mut memory = None;
    let cache: Arc<dyn Cache> = match config.backend {
        CacheBackend::Memory => {
            let cache = MemoryCache::new(config.max_entries)
                .context("failed to create in-memory cache")?;
            memory = Some(cache.clone());
            info!("In-memory cache initialized");
            Arc::new(cache)
        }
        CacheBackend::Redis => {
            let cache = RedisCache::connect(&config.redis_settings())
                .await
                .with_context(|| format!("failed to connect to Redis at {}", config.redis_addr))?;
            Arc::new(cache)
        }
    };

    let app = create_router(AppState::new(cache, config.default_ttl()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(memory) = memory {
        let stats = memory.stats().await;
        info!(
            "Final cache statistics: {} (hit rate {:.2})",
            serde_json::to_string(&stats)?,
            stats.hit_rate()
        );
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
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
}
