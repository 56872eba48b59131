//! Data models for preference storage

use donation_watch::{Address, Network};
use serde::{Deserialize, Serialize};

/// Persisted user preferences
///
/// Field names match the keys the popup has always stored, so an existing
/// `preferences.json` keeps working.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Absent until the user has chosen a network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_testnet: Option<bool>,

    /// Every address shown so far, oldest first, without duplicates
    #[serde(default)]
    pub generated_addresses: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_address: Option<String>,
}

impl Preferences {
    /// Saved network, or `default` when none was saved
    pub fn network_or(&self, default: Network) -> Network {
        self.use_testnet
            .map(Network::from_testnet_flag)
            .unwrap_or(default)
    }

    pub fn set_network(&mut self, network: Network) {
        self.use_testnet = Some(network.is_testnet());
    }

    /// No address has ever been shown
    pub fn is_first_use(&self) -> bool {
        self.generated_addresses.is_empty()
    }

    /// Make `address` current and append it to the history if new
    pub fn remember(&mut self, address: &Address) {
        if !self
            .generated_addresses
            .iter()
            .any(|known| known == address.as_str())
        {
            self.generated_addresses.push(address.to_string());
        }
        self.current_address = Some(address.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_camel_case() {
        let mut prefs = Preferences::default();
        prefs.set_network(Network::Testnet);
        prefs.remember(&Address::demo());

        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["useTestnet"], true);
        assert_eq!(json["currentAddress"], "mwCwTceJvYV27KXBc3NJZys6CjsgsoeHmf");
        assert_eq!(json["generatedAddresses"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_remember_does_not_duplicate() {
        let mut prefs = Preferences::default();
        assert!(prefs.is_first_use());
        prefs.remember(&Address::demo());
        prefs.remember(&Address::demo());
        assert_eq!(prefs.generated_addresses.len(), 1);
        assert!(!prefs.is_first_use());
    }

    #[test]
    fn test_missing_network_uses_default() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs.network_or(Network::Mainnet), Network::Mainnet);

        let prefs: Preferences = serde_json::from_str(r#"{"useTestnet": false}"#).unwrap();
        assert_eq!(prefs.network_or(Network::Testnet), Network::Mainnet);
    }
}
