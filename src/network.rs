//! Network selector (mainnet / testnet)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Map the persisted `useTestnet` flag to a network
    pub fn from_testnet_flag(use_testnet: bool) -> Self {
        if use_testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::Testnet)
    }

    /// Display unit for amounts on this network
    pub fn unit(&self) -> &'static str {
        match self {
            Network::Mainnet => "BTC",
            Network::Testnet => "tBTC",
        }
    }

    /// Chain segment of the explorer API path (`/v1/btc/{segment}`)
    pub fn chain_segment(&self) -> &'static str {
        match self {
            Network::Mainnet => "main",
            Network::Testnet => "test3",
        }
    }

    /// Slug used by the explorer website (`live.blockcypher.com/{slug}/...`)
    pub fn explorer_slug(&self) -> &'static str {
        match self {
            Network::Mainnet => "btc",
            Network::Testnet => "btc-testnet",
        }
    }

    /// Get the BIP44 coin type for this network
    ///
    /// - Mainnet: 0
    /// - Testnet: 1
    pub fn coin_type(&self) -> u32 {
        match self {
            Network::Mainnet => 0,
            Network::Testnet => 1,
        }
    }
}

impl From<Network> for bitcoin::Network {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet => bitcoin::Network::Bitcoin,
            Network::Testnet => bitcoin::Network::Testnet,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "bitcoin" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" | "test3" => Ok(Network::Testnet),
            other => Err(WatchError::Config(format!("Unknown network '{}'", other))),
        }
    }
}
