//! Balance aggregation and BTC formatting
//!
//! Balances are read from the explorer's summary fields, not summed from the
//! transaction list, so the two can disagree when the list is truncated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::network::Network;
use crate::record::RawFetchResult;

/// Satoshis per bitcoin
pub const SATS_PER_BTC: i128 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub confirmed_sats: u64,
    pub unconfirmed_sats: i64,
    pub as_of: DateTime<Utc>,
}

/// Balance strings with exactly eight decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDisplay {
    pub confirmed: String,
    pub unconfirmed: String,
    pub total: String,
}

impl BalanceSnapshot {
    /// Zero balance used when no data could be fetched
    pub fn zero(as_of: DateTime<Utc>) -> Self {
        Self {
            confirmed_sats: 0,
            unconfirmed_sats: 0,
            as_of,
        }
    }

    pub fn total_sats(&self) -> i128 {
        i128::from(self.confirmed_sats) + i128::from(self.unconfirmed_sats)
    }

    pub fn formatted(&self) -> BalanceDisplay {
        BalanceDisplay {
            confirmed: format_btc(self.confirmed_sats),
            unconfirmed: format_btc(self.unconfirmed_sats),
            total: format_btc(self.total_sats()),
        }
    }

    /// Single-line balance text, e.g. `117.29789710 tBTC (0.00015924 unconfirmed)`
    pub fn display_text(&self, network: Network) -> String {
        let formatted = self.formatted();
        if self.unconfirmed_sats != 0 {
            format!(
                "{} {} ({} unconfirmed)",
                formatted.confirmed,
                network.unit(),
                formatted.unconfirmed
            )
        } else {
            format!("{} {}", formatted.total, network.unit())
        }
    }
}

/// Read the balance summary of a fetch result
pub fn aggregate(raw: &RawFetchResult) -> BalanceSnapshot {
    aggregate_at(raw, Utc::now())
}

/// `aggregate` with an explicit snapshot time
pub fn aggregate_at(raw: &RawFetchResult, as_of: DateTime<Utc>) -> BalanceSnapshot {
    let confirmed = raw.balance.unwrap_or(0);
    if confirmed < 0 {
        log::warn!(
            "Explorer reported negative confirmed balance {} for {:?}, using 0",
            confirmed,
            raw.address
        );
    }

    BalanceSnapshot {
        confirmed_sats: u64::try_from(confirmed).unwrap_or(0),
        unconfirmed_sats: raw.unconfirmed_balance.unwrap_or(0),
        as_of,
    }
}

/// Format satoshis as BTC with exactly eight decimals
///
/// Integer arithmetic only, so no value is ever rounded.
pub fn format_btc(sats: impl Into<i128>) -> String {
    let sats = sats.into();
    let sign = if sats < 0 { "-" } else { "" };
    let magnitude = sats.unsigned_abs();
    let per_btc = SATS_PER_BTC.unsigned_abs();
    format!(
        "{}{}.{:08}",
        sign,
        magnitude / per_btc,
        magnitude % per_btc
    )
}
