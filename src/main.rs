//! Redis Facade - A small REST API over a Redis key-value store
//!
//! Binary entry point: configuration, store connection and HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_facade::store::{MemoryStoreClient, RedisStoreClient, StoreClient};
use redis_facade::{create_router, AppState, Config, StoreBackend};

/// Main entry point for the facade server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the store client and verify it with PING
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_facade=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Redis Facade Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, redis_url={}, timeout={}ms, port={}",
        config.store_backend, config.redis_url, config.redis_timeout_ms, config.server_port
    );

    let client = connect_store(&config).await?;
    client
        .ping()
        .await
        .context("store did not answer PING")?;
    info!("Store connection verified");

    let app = create_router(AppState::from_client(client));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the configured store client.
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn StoreClient>> {
    match config.store_backend {
        StoreBackend::Redis => {
            let client = RedisStoreClient::connect(&config.redis_url, config.redis_timeout())
                .await
                .with_context(|| format!("failed to connect to {}", config.redis_url))?;
            Ok(Arc::new(client))
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStoreClient::new()))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
