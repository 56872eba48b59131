//! Public chain address bound to a network

use bitcoin::address::NetworkUnchecked;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::WatchError;
use crate::network::Network;

/// Shared testnet address with a built-in fixture (see `fixtures`)
pub const DEMO_TESTNET_ADDRESS: &str = "mwCwTceJvYV27KXBc3NJZys6CjsgsoeHmf";

/// Last-resort mainnet address shown when key generation fails
pub const FALLBACK_MAINNET_ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

/// An address string and the network it belongs to
///
/// Never mutated: a new address or a network switch produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    value: String,
    network: Network,
}

impl Address {
    /// Wrap an address string without validating it
    pub fn new_unchecked(value: impl Into<String>, network: Network) -> Self {
        Self {
            value: value.into(),
            network,
        }
    }

    /// Parse and validate an address for the given network
    pub fn parse(value: &str, network: Network) -> Result<Self, WatchError> {
        let value = value.trim();
        let unchecked: bitcoin::Address<NetworkUnchecked> = value
            .parse()
            .map_err(|e| WatchError::InvalidAddress(format!("{}: {}", value, e)))?;

        if !unchecked.is_valid_for_network(network.into()) {
            return Err(WatchError::InvalidAddress(format!(
                "{} is not a {} address",
                value, network
            )));
        }

        Ok(Self::new_unchecked(value, network))
    }

    /// The demo address (testnet only)
    pub fn demo() -> Self {
        Self::new_unchecked(DEMO_TESTNET_ADDRESS, Network::Testnet)
    }

    /// Hardcoded address used when generation fails
    pub fn fallback(network: Network) -> Self {
        match network {
            Network::Testnet => Self::demo(),
            Network::Mainnet => Self::new_unchecked(FALLBACK_MAINNET_ADDRESS, Network::Mainnet),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn is_demo(&self) -> bool {
        self.network.is_testnet() && self.value == DEMO_TESTNET_ADDRESS
    }

    /// BIP21 payment URI encoded into the QR code
    pub fn payment_uri(&self) -> String {
        format!("bitcoin:{}", self.value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
