use async_trait::async_trait;
use std::sync::Arc;

use crate::address::Address;
use crate::config::WatchConfig;
use crate::error::{NetworkError, WatchError};
use crate::fixtures;
use crate::record::RawFetchResult;

/// Source of raw chain data for an address
///
/// One call issues at most one outbound request. Implementations must not
/// mutate shared state; the caller owns the result.
#[async_trait]
pub trait ChainDataFetcher: Send + Sync {
    async fn fetch(&self, address: &Address) -> Result<RawFetchResult, NetworkError>;
}

/// BlockCypher-compatible explorer client
pub struct BlockCypherFetcher {
    client: reqwest::Client,
    config: WatchConfig,
}

impl BlockCypherFetcher {
    pub fn new(config: WatchConfig) -> Result<Self, WatchError> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .map_err(|e| WatchError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Address endpoint URL without the API token
    pub fn address_url(&self, address: &Address) -> String {
        format!(
            "{}/addrs/{}?unspentOnly=false&includeScript=false&includeMempool=true&limit={}",
            self.config.api_base(address.network()),
            address,
            self.config.tx_limit
        )
    }
}

#[async_trait]
impl ChainDataFetcher for BlockCypherFetcher {
    async fn fetch(&self, address: &Address) -> Result<RawFetchResult, NetworkError> {
        let url = self.address_url(address);
        log::debug!("Fetching address data from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.config.api_token {
            request = request.query(&[("token", token)]);
        }

        let response = request.send().await.map_err(NetworkError::from)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("API error for {}: {}", address, status);
            return Err(NetworkError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(NetworkError::from)?;
        serde_json::from_str(&body).map_err(|e| NetworkError::Decode(e.to_string()))
    }
}

/// Serves the demo address from its built-in fixture, everything else from `inner`
pub struct DemoFetcher {
    inner: Arc<dyn ChainDataFetcher>,
}

impl DemoFetcher {
    pub fn new(inner: Arc<dyn ChainDataFetcher>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ChainDataFetcher for DemoFetcher {
    async fn fetch(&self, address: &Address) -> Result<RawFetchResult, NetworkError> {
        if address.is_demo() {
            log::debug!("Using demo fixture for {}", address);
            return Ok(fixtures::demo_fetch_result());
        }
        self.inner.fetch(address).await
    }
}
