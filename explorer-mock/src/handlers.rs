/// Axum HTTP handlers for the BlockCypher address endpoint

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use donation_watch::RawFetchResult;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::types::*;

/// Shared application state
pub type AppState = Arc<FixtureStore>;

/// Custom error type for handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Injected failure, answered with this status
    #[error("Injected failure ({0})")]
    Upstream(u16),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(code) => {
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn check_chain(chain: &str) -> Result<(), ApiError> {
    if CHAINS.contains(&chain) {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("Unknown chain: {}", chain)))
    }
}

/// GET /v1/btc/{chain}/addrs/{address}
/// Returns the fixture, an empty zero-balance payload, or the injected failure
pub async fn get_address(
    State(store): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<Json<RawFetchResult>, ApiError> {
    check_chain(&chain)?;
    store.record_request(&chain, &address);

    if let Some(status) = store.failure(&chain, &address) {
        log::info!("Failing {}/{} with {}", chain, address, status);
        return Err(ApiError::Upstream(status));
    }

    let payload = store.get(&chain, &address).unwrap_or_else(|| {
        log::debug!("No fixture for {}/{}, serving empty address", chain, address);
        empty_address(&address)
    });
    Ok(Json(payload))
}

/// PUT /v1/btc/{chain}/addrs/{address}
/// Installs a fixture (not part of the BlockCypher API)
pub async fn put_address(
    State(store): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
    Json(fixture): Json<RawFetchResult>,
) -> Result<StatusCode, ApiError> {
    check_chain(&chain)?;
    log::info!(
        "Installing fixture for {}/{} ({} txrefs)",
        chain,
        address,
        fixture.txrefs.len()
    );
    store.insert(&chain, &address, fixture);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /mock/fail/{chain}/{address}
pub async fn set_failure(
    State(store): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
    Json(req): Json<FailRequest>,
) -> Result<StatusCode, ApiError> {
    check_chain(&chain)?;
    if !(400..=599).contains(&req.status) {
        return Err(ApiError::BadRequest(format!(
            "Failure status must be 4xx or 5xx, got {}",
            req.status
        )));
    }
    store.fail_with(&chain, &address, req.status);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /mock/fail/{chain}/{address}
pub async fn clear_failure(
    State(store): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    check_chain(&chain)?;
    if store.clear_failure(&chain, &address) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "No failure configured for {}/{}",
            chain, address
        )))
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::create_router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use donation_watch::DEMO_TESTNET_ADDRESS;
    use tower::ServiceExt;

    async fn send(store: AppState, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = create_router(store).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_demo_fixture() {
        let store = Arc::new(FixtureStore::seeded());
        let uri = format!(
            "/v1/btc/test3/addrs/{}?unspentOnly=false&includeMempool=true&limit=50",
            DEMO_TESTNET_ADDRESS
        );

        let (status, body) = send(store.clone(), get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], 11729789710i64);
        assert_eq!(body["txrefs"].as_array().unwrap().len(), 4);
        assert_eq!(store.request_count("test3", DEMO_TESTNET_ADDRESS), 1);
    }

    #[tokio::test]
    async fn test_unknown_address_is_empty() {
        let store = Arc::new(FixtureStore::new());
        let (status, body) = send(store, get("/v1/btc/main/addrs/1abc")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], 0);
        assert_eq!(body["address"], "1abc");
    }

    #[tokio::test]
    async fn test_unknown_chain() {
        let store = Arc::new(FixtureStore::new());
        let (status, _) = send(store, get("/v1/btc/signet/addrs/x")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = Arc::new(FixtureStore::seeded());
        let fail = Request::post(format!("/mock/fail/test3/{}", DEMO_TESTNET_ADDRESS))
            .header("content-type", "application/json")
            .body(Body::from(r#"{"status": 503}"#))
            .unwrap();
        let (status, _) = send(store.clone(), fail).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let uri = format!("/v1/btc/test3/addrs/{}", DEMO_TESTNET_ADDRESS);
        let (status, body) = send(store.clone(), get(&uri)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Injected failure (503)");

        let clear = Request::delete(format!("/mock/fail/test3/{}", DEMO_TESTNET_ADDRESS))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(store.clone(), clear).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(store, get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_non_error_status() {
        let store = Arc::new(FixtureStore::new());
        let fail = Request::post("/mock/fail/main/x")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"status": 200}"#))
            .unwrap();
        let (status, _) = send(store, fail).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_installs_fixture() {
        let store = Arc::new(FixtureStore::new());
        let put = Request::put("/v1/btc/main/addrs/bc1qexample")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"balance": 42, "unconfirmed_balance": -2}"#))
            .unwrap();
        let (status, _) = send(store.clone(), put).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(store.get("main", "bc1qexample").unwrap().balance, Some(42));
    }
}
