//! Explorer Fetcher Integration Tests
//!
//! Runs `BlockCypherFetcher` against a wiremock explorer: request shape,
//! success decoding and each failure class.
//!
//! Run with: cargo test --test fetcher_test -- --nocapture

mod common;

use common::init_logging;
use donation_watch::{
    Address, BlockCypherFetcher, ChainDataFetcher, Network, NetworkError, WalletView, WatchConfig,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEMO_PATH: &str = "/v1/btc/test3/addrs/mwCwTceJvYV27KXBc3NJZys6CjsgsoeHmf";

fn fetcher_for(server: &MockServer) -> anyhow::Result<BlockCypherFetcher> {
    let config = WatchConfig::default().with_explorer_root(&server.uri());
    Ok(BlockCypherFetcher::new(config)?)
}

fn address_body() -> serde_json::Value {
    json!({
        "address": "mwCwTceJvYV27KXBc3NJZys6CjsgsoeHmf",
        "balance": 10000,
        "unconfirmed_balance": -2500,
        "final_balance": 7500,
        "n_tx": 2,
        "txrefs": [{
            "tx_hash": "afc7d05f",
            "block_height": 1039712,
            "tx_input_n": -1,
            "value": 10000,
            "confirmations": 12,
            "confirmed": "2024-10-05T10:00:35Z"
        }],
        "unconfirmed_txrefs": [{
            "tx_hash": "00c3404c",
            "block_height": -1,
            "tx_input_n": 0,
            "value": 2500,
            "confirmations": 0
        }]
    })
}

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_fetch_decodes_address_response() -> anyhow::Result<()> {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DEMO_PATH))
        .and(query_param("includeMempool", "true"))
        .and(query_param("unspentOnly", "false"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(address_body()))
        .expect(1)
        .mount(&server)
        .await;

    let raw = fetcher_for(&server)?.fetch(&Address::demo()).await?;
    assert_eq!(raw.balance, Some(10_000));
    assert_eq!(raw.records().len(), 2);

    let view = WalletView::from_fetch(Address::demo(), &raw);
    assert_eq!(view.transactions[0].id, "00c3404c");
    assert_eq!(view.balance.total_sats(), 7_500);
    Ok(())
}

#[tokio::test]
async fn test_fetch_sends_token_when_configured() -> anyhow::Result<()> {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DEMO_PATH))
        .and(query_param("token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(address_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = WatchConfig::default().with_explorer_root(&server.uri());
    config.api_token = Some("secret-token".into());
    let fetcher = BlockCypherFetcher::new(config)?;

    fetcher.fetch(&Address::demo()).await?;
    Ok(())
}

#[tokio::test]
async fn test_mainnet_uses_main_chain() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/btc/main/addrs/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "balance": 0,
            "unconfirmed_balance": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let raw = fetcher_for(&server)?
        .fetch(&Address::fallback(Network::Mainnet))
        .await?;
    assert!(!raw.has_transactions());
    Ok(())
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_non_success_status() -> anyhow::Result<()> {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DEMO_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = fetcher_for(&server)?
        .fetch(&Address::demo())
        .await
        .unwrap_err();
    assert_eq!(err, NetworkError::Status(429));
    assert_eq!(err.to_string(), "Network response was not ok: 429");
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DEMO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = fetcher_for(&server)?
        .fetch(&Address::demo())
        .await
        .unwrap_err();
    assert!(matches!(err, NetworkError::Decode(_)), "got {:?}", err);
    Ok(())
}

#[tokio::test]
async fn test_slow_explorer_times_out() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DEMO_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(address_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut config = WatchConfig::default().with_explorer_root(&server.uri());
    config.fetch_timeout = Duration::from_millis(200);
    let fetcher = BlockCypherFetcher::new(config)?;

    let err = fetcher.fetch(&Address::demo()).await.unwrap_err();
    assert_eq!(err, NetworkError::Timeout);
    Ok(())
}
