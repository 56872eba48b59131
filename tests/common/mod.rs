//! Shared helpers for donation-watch integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use donation_watch::{Address, ChainDataFetcher, NetworkError, RawFetchResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Initialize logging once per test binary
pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Fetcher that records every call and tracks concurrent fetches
pub struct RecordingFetcher {
    calls: Mutex<Vec<Address>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    failing: AtomicBool,
    delay: Duration,
    response: RawFetchResult,
}

impl RecordingFetcher {
    pub fn new(response: RawFetchResult) -> Self {
        Self::with_delay(response, Duration::ZERO)
    }

    pub fn with_delay(response: RawFetchResult, delay: Duration) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            delay,
            response,
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Address> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainDataFetcher for RecordingFetcher {
    async fn fetch(&self, address: &Address) -> Result<RawFetchResult, NetworkError> {
        self.calls.lock().unwrap().push(address.clone());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(NetworkError::Status(500));
        }
        Ok(self.response.clone())
    }
}
