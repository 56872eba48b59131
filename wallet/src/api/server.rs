use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::config::WalletConfig;
use crate::manager::WalletManager;

pub async fn start_server(config: WalletConfig) -> anyhow::Result<()> {
    let addr = config.bind_address.clone();
    let wallet_manager = Arc::new(WalletManager::new(config)?);
    wallet_manager.startup().await?;

    let app = router(wallet_manager.clone()).layer(cors_layer()?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    wallet_manager.shutdown();
    Ok(())
}

/// Route table without CORS (tests mount it directly)
pub fn router(manager: Arc<WalletManager>) -> Router {
    Router::new()
        .route("/api/popup", get(handlers::popup_handler))
        .route("/api/summary", get(handlers::summary_handler))
        .route(
            "/api/address/generate",
            post(handlers::generate_address_handler),
        )
        .route("/api/address/copy", get(handlers::copy_address_handler))
        .route("/api/addresses", get(handlers::address_history_handler))
        .route("/api/refresh", post(handlers::refresh_handler))
        .route("/api/network", put(handlers::set_network_handler))
        .with_state(manager)
}

/// Set ALLOWED_ORIGINS="https://a.example,https://b.example" to restrict origins;
/// otherwise any origin is allowed (development mode)
fn cors_layer() -> anyhow::Result<CorsLayer> {
    match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            log::info!("CORS configured for origins: {}", origins);
            let origin_list = origins
                .split(',')
                .map(|s| s.trim().parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
            Ok(CorsLayer::new()
                .allow_origin(origin_list)
                .allow_methods(Any)
                .allow_headers(Any))
        }
        _ => {
            log::warn!("CORS: Allowing all origins (development mode). Set ALLOWED_ORIGINS env var for production.");
            Ok(CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any))
        }
    }
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, stopping polling...");
}
