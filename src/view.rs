//! Presentation-ready model handed to the UI boundary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::balance::{aggregate_at, BalanceSnapshot};
use crate::normalize::{normalize, CanonicalTransaction, TransactionPage};
use crate::record::RawFetchResult;

/// Balance and ordered transactions for one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletView {
    pub address: Address,
    pub balance: BalanceSnapshot,
    /// Every normalized transaction, display order
    pub transactions: Vec<CanonicalTransaction>,
}

impl WalletView {
    pub fn from_fetch(address: Address, raw: &RawFetchResult) -> Self {
        Self::from_fetch_at(address, raw, Utc::now())
    }

    pub fn from_fetch_at(address: Address, raw: &RawFetchResult, as_of: DateTime<Utc>) -> Self {
        Self {
            address,
            balance: aggregate_at(raw, as_of),
            transactions: normalize(&raw.records()),
        }
    }

    /// Zero balance, no transactions
    pub fn empty(address: Address) -> Self {
        Self {
            address,
            balance: BalanceSnapshot::zero(Utc::now()),
            transactions: Vec::new(),
        }
    }

    pub fn has_transactions(&self) -> bool {
        !self.transactions.is_empty()
    }

    pub fn detail(&self) -> TransactionPage {
        TransactionPage::detail(&self.transactions)
    }

    pub fn summary(&self) -> TransactionPage {
        TransactionPage::summary(&self.transactions)
    }
}

/// Explorer page for a transaction
pub fn transaction_link(address: &Address, tx_id: &str) -> String {
    format!(
        "https://live.blockcypher.com/{}/tx/{}/",
        address.network().explorer_slug(),
        tx_id
    )
}

/// Explorer page listing every transaction of an address
pub fn address_link(address: &Address) -> String {
    format!(
        "https://live.blockcypher.com/{}/address/{}/",
        address.network().explorer_slug(),
        address
    )
}

/// `first8...last8` form of a transaction id
pub fn short_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 16 {
        return id.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Network;

    #[test]
    fn test_empty_fetch_has_no_transactions() {
        let raw = RawFetchResult {
            balance: Some(0),
            ..Default::default()
        };
        let view = WalletView::from_fetch(Address::demo(), &raw);
        assert!(!view.has_transactions());
        assert!(view.detail().is_empty());
    }

    #[test]
    fn test_links() {
        let demo = Address::demo();
        assert_eq!(
            transaction_link(&demo, "abc"),
            "https://live.blockcypher.com/btc-testnet/tx/abc/"
        );
        let mainnet = Address::fallback(Network::Mainnet);
        assert_eq!(
            address_link(&mainnet),
            "https://live.blockcypher.com/btc/address/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa/"
        );
    }

    #[test]
    fn test_short_id() {
        assert_eq!(
            short_id("00c3404c9f00559b8da74c7214f21875ba2d23c97774271aacca659d21e7dd5"),
            "00c3404c...d21e7dd5"
        );
        assert_eq!(short_id("abc"), "abc");
    }
}
