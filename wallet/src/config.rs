/// Wallet configuration from environment variables
///
/// Wraps the explorer/polling settings of `donation_watch` and adds what the
/// popup backend needs: where preferences live, where the API listens, and
/// which network a first-time user starts on. Defaults to testnet.

use donation_watch::{Network, WatchConfig};
use std::env;
use std::path::PathBuf;

use crate::error::WalletError;

pub const DEFAULT_DATA_DIR: &str = "./wallet-data";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct WalletConfig {
    /// Explorer endpoints, token, polling interval
    pub watch: WatchConfig,
    /// Directory holding `preferences.json`
    pub data_dir: PathBuf,
    /// Address the HTTP API binds to
    pub bind_address: String,
    /// Network used when no preference has been saved yet
    pub default_network: Network,
    /// Show the demo address on first testnet use instead of generating
    pub demo_on_first_use: bool,
}

impl WalletConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables (in addition to those read by `WatchConfig`):
    /// - `WALLET_DATA_DIR`: preference directory (default `./wallet-data`)
    /// - `BIND_ADDRESS`: API listen address (default `127.0.0.1:3000`)
    /// - `DEFAULT_NETWORK`: "testnet" (default) or "mainnet"
    /// - `DEMO_ON_FIRST_USE`: "true" (default) or "false"
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Testnet against the local explorer mock
    /// EXPLORER_TESTNET_URL=http://localhost:3100/v1/btc/test3 cargo run -p wallet
    ///
    /// # Start on mainnet, never show the demo address
    /// DEFAULT_NETWORK=mainnet DEMO_ON_FIRST_USE=false cargo run -p wallet
    /// ```
    pub fn from_env() -> Result<Self, WalletError> {
        let watch = WatchConfig::from_env()?;

        let data_dir = PathBuf::from(
            env::var("WALLET_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
        );
        log::info!("💾 Preferences directory: {}", data_dir.display());

        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        let default_network = match env::var("DEFAULT_NETWORK") {
            Ok(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => Network::Testnet,
        };
        match default_network {
            Network::Testnet => log::info!("🔧 Default network: TESTNET"),
            Network::Mainnet => log::info!("🌐 Default network: MAINNET"),
        }

        let demo_on_first_use = match env::var("DEMO_ON_FIRST_USE") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                WalletError::InvalidInput(format!("Invalid DEMO_ON_FIRST_USE: {}", raw))
            })?,
            Err(_) => true,
        };

        Ok(Self {
            watch,
            data_dir,
            bind_address,
            default_network,
            demo_on_first_use,
        })
    }
}

impl Default for WalletConfig {
    /// Default configuration (testnet, public BlockCypher endpoints)
    fn default() -> Self {
        Self {
            watch: WatchConfig::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            default_network: Network::Testnet,
            demo_on_first_use: true,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
