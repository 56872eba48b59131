/// Explorer and polling configuration from environment variables
///
/// Controls explorer endpoints per network, the optional API token, the
/// polling interval and the fetch timeout.

use std::env;
use std::time::Duration;

use crate::error::WatchError;
use crate::network::Network;

pub const DEFAULT_TESTNET_API: &str = "https://api.blockcypher.com/v1/btc/test3";
pub const DEFAULT_MAINNET_API: &str = "https://api.blockcypher.com/v1/btc/main";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(15_000);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_TX_LIMIT: u32 = 50;

#[derive(Clone)]
pub struct WatchConfig {
    /// Explorer API base URL for testnet
    pub testnet_api_url: String,
    /// Explorer API base URL for mainnet
    pub mainnet_api_url: String,
    /// Optional explorer API token (appended as `token=`)
    pub api_token: Option<String>,
    /// Interval between background refreshes
    pub poll_interval: Duration,
    /// Per-request timeout
    pub fetch_timeout: Duration,
    /// Maximum number of transaction references requested
    pub tx_limit: u32,
}

impl WatchConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `EXPLORER_TESTNET_URL`: testnet API base (default BlockCypher test3)
    /// - `EXPLORER_MAINNET_URL`: mainnet API base (default BlockCypher main)
    /// - `BLOCKCYPHER_TOKEN`: API token (optional)
    /// - `POLL_INTERVAL_MS`: background refresh interval, > 0 (default 15000)
    /// - `FETCH_TIMEOUT_SECS`: request timeout (default 15)
    /// - `TX_FETCH_LIMIT`: transaction references per request (default 50)
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Point both networks at a local explorer mock
    /// EXPLORER_TESTNET_URL=http://localhost:3100/v1/btc/test3 \
    /// EXPLORER_MAINNET_URL=http://localhost:3100/v1/btc/main cargo run -p wallet
    /// ```
    pub fn from_env() -> Result<Self, WatchError> {
        let testnet_api_url =
            env::var("EXPLORER_TESTNET_URL").unwrap_or_else(|_| DEFAULT_TESTNET_API.to_string());
        let mainnet_api_url =
            env::var("EXPLORER_MAINNET_URL").unwrap_or_else(|_| DEFAULT_MAINNET_API.to_string());
        log::info!("📡 Testnet explorer: {}", testnet_api_url);
        log::info!("📡 Mainnet explorer: {}", mainnet_api_url);

        let api_token = env::var("BLOCKCYPHER_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        if api_token.is_none() {
            log::info!("No BLOCKCYPHER_TOKEN set, using anonymous explorer rate limits");
        }

        let poll_interval = match env::var("POLL_INTERVAL_MS") {
            Ok(raw) => {
                let millis: u64 = raw
                    .parse()
                    .map_err(|_| WatchError::Config(format!("Invalid POLL_INTERVAL_MS: {}", raw)))?;
                if millis == 0 {
                    return Err(WatchError::Config("POLL_INTERVAL_MS must be positive".into()));
                }
                Duration::from_millis(millis)
            }
            Err(_) => DEFAULT_POLL_INTERVAL,
        };

        let fetch_timeout = match env::var("FETCH_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse().map_err(|_| {
                WatchError::Config(format!("Invalid FETCH_TIMEOUT_SECS: {}", raw))
            })?),
            Err(_) => DEFAULT_FETCH_TIMEOUT,
        };

        let tx_limit = match env::var("TX_FETCH_LIMIT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| WatchError::Config(format!("Invalid TX_FETCH_LIMIT: {}", raw)))?,
            Err(_) => DEFAULT_TX_LIMIT,
        };

        log::info!(
            "⏱️  Polling every {:?}, fetch timeout {:?}",
            poll_interval,
            fetch_timeout
        );

        Ok(Self {
            testnet_api_url,
            mainnet_api_url,
            api_token,
            poll_interval,
            fetch_timeout,
            tx_limit,
        })
    }

    /// Explorer API base URL for the given network
    pub fn api_base(&self, network: Network) -> &str {
        match network {
            Network::Testnet => self.testnet_api_url.trim_end_matches('/'),
            Network::Mainnet => self.mainnet_api_url.trim_end_matches('/'),
        }
    }

    /// Point both networks at one explorer root (`{root}/v1/btc/{chain}`)
    pub fn with_explorer_root(mut self, root: &str) -> Self {
        let root = root.trim_end_matches('/');
        self.testnet_api_url = format!("{}/v1/btc/{}", root, Network::Testnet.chain_segment());
        self.mainnet_api_url = format!("{}/v1/btc/{}", root, Network::Mainnet.chain_segment());
        self
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            testnet_api_url: DEFAULT_TESTNET_API.to_string(),
            mainnet_api_url: DEFAULT_MAINNET_API.to_string(),
            api_token: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            tx_limit: DEFAULT_TX_LIMIT,
        }
    }
}

impl std::fmt::Debug for WatchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchConfig")
            .field("testnet_api_url", &self.testnet_api_url)
            .field("mainnet_api_url", &self.mainnet_api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("poll_interval", &self.poll_interval)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("tx_limit", &self.tx_limit)
            .finish()
    }
}
