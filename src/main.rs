//! AI Response Cache - admin server
//!
//! Runs one cache instance behind a small HTTP admin API, optionally
//! restoring a snapshot at startup and writing one at shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ai_response_cache::api::create_router;
use ai_response_cache::{AppState, CacheConfig};

/// Main entry point for the cache admin server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and start its cleanup scheduler
/// 4. Import the snapshot at `CACHE_SNAPSHOT_PATH`, if any
/// 5. Serve the admin router on the configured port
/// 6. On SIGINT/SIGTERM, write the snapshot and close the cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ai_response_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AI response cache");

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: max_size={}, max_memory_size={}, default_ttl={}ms, strategy={}, prefix={}, port={}",
        config.max_size,
        config.max_memory_size,
        config.default_ttl,
        config.strategy,
        config.key_prefix,
        config.server_port
    );

    let state = AppState::from_config(&config);
    let cache = state.cache.clone();
    info!(
        "Cache initialized, cleanup every {:?}",
        config.effective_cleanup_interval()
    );

    let snapshot_path = std::env::var("CACHE_SNAPSHOT_PATH").ok();
    if let Some(path) = &snapshot_path {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => match cache.import_json(&raw).await {
                Ok(summary) => info!("Restored {} entries from {}", summary.imported, path),
                Err(e) => warn!("Ignoring unreadable snapshot {}: {}", path, e),
            },
            Err(e) => warn!("No snapshot restored from {}: {}", path, e),
        }
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(path) = &snapshot_path {
        let snapshot = cache.export().await;
        let body = serde_json::to_string(&snapshot)?;
        tokio::fs::write(path, body)
            .await
            .with_context(|| format!("failed to write snapshot to {}", path))?;
        info!("Wrote {} entries to {}", snapshot.entries.len(), path);
    }

    match Arc::try_unwrap(cache) {
        Ok(mut cache) => {
            let released = cache.close().await;
            info!("Cache closed, {} entries released", released);
        }
        Err(_) => warn!("Cache still shared at shutdown, cleanup task stops on drop"),
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
