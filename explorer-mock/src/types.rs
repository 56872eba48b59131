/// Fixture storage and request types
///
/// Address payloads are `donation_watch::RawFetchResult`, so whatever the mock
/// serves is exactly what the fetcher decodes.

use donation_watch::fixtures::demo_fetch_result;
use donation_watch::{RawFetchResult, DEMO_TESTNET_ADDRESS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Chain segments the BlockCypher API uses
pub const CHAINS: &[&str] = &["main", "test3"];

/// (chain, address)
type Key = (String, String);

/// In-memory address fixtures, injected failures and request counts
#[derive(Debug, Default)]
pub struct FixtureStore {
    fixtures: RwLock<HashMap<Key, RawFetchResult>>,
    failures: RwLock<HashMap<Key, u16>>,
    requests: RwLock<HashMap<Key, u64>>,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the demo address on `test3`
    pub fn seeded() -> Self {
        let store = Self::new();
        store.insert("test3", DEMO_TESTNET_ADDRESS, demo_fetch_result());
        store
    }

    pub fn insert(&self, chain: &str, address: &str, fixture: RawFetchResult) {
        self.fixtures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key(chain, address), fixture);
    }

    pub fn get(&self, chain: &str, address: &str) -> Option<RawFetchResult> {
        self.fixtures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key(chain, address))
            .cloned()
    }

    /// Answer every request for the address with `status` until cleared
    pub fn fail_with(&self, chain: &str, address: &str, status: u16) {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key(chain, address), status);
    }

    pub fn clear_failure(&self, chain: &str, address: &str) -> bool {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key(chain, address))
            .is_some()
    }

    pub fn failure(&self, chain: &str, address: &str) -> Option<u16> {
        self.failures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key(chain, address))
            .copied()
    }

    pub fn record_request(&self, chain: &str, address: &str) {
        *self
            .requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key(chain, address))
            .or_insert(0) += 1;
    }

    /// Number of address requests served (including failed ones)
    pub fn request_count(&self, chain: &str, address: &str) -> u64 {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key(chain, address))
            .copied()
            .unwrap_or(0)
    }
}

fn key(chain: &str, address: &str) -> Key {
    (chain.to_string(), address.to_string())
}

/// Zero-balance payload for an address with no history
pub fn empty_address(address: &str) -> RawFetchResult {
    RawFetchResult {
        address: Some(address.to_string()),
        balance: Some(0),
        unconfirmed_balance: Some(0),
        final_balance: Some(0),
        n_tx: Some(0),
        ..Default::default()
    }
}

/// Body of POST /mock/fail/{chain}/{address}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailRequest {
    pub status: u16,
}
