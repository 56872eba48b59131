/// Axum HTTP server setup and routing

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::types::FixtureStore;

pub fn create_router(store: Arc<FixtureStore>) -> Router {
    // Configure CORS to allow requests from the popup and tests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // BlockCypher address endpoint
        .route(
            "/v1/btc/:chain/addrs/:address",
            get(get_address).put(put_address),
        )
        // Failure injection (not part of the BlockCypher API)
        .route(
            "/mock/fail/:chain/:address",
            post(set_failure).delete(clear_failure),
        )
        // Shared state
        .with_state(store)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(store: Arc<FixtureStore>, host: String, port: u16) -> anyhow::Result<()> {
    let app = create_router(store);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("🚀 Explorer mock server listening on http://{}", addr);
    log::info!("📡 Address endpoint: GET /v1/btc/{{main|test3}}/addrs/{{address}}");
    log::info!("💥 Failure injection: POST /mock/fail/{{chain}}/{{address}}");

    axum::serve(listener, app).await?;

    Ok(())
}
