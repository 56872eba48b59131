//! Transaction normalization
//!
//! Converts raw explorer records into `CanonicalTransaction`s and orders them
//! for display. The conversion is a pure function of its input.
//!
//! Field resolution per record, first match wins:
//!
//! 1. `value` (explicit amount)
//! 2. `ref_balance`, only for incoming records
//! 3. `value_satoshis`
//! 4. zero
//!
//! Ordering is newest first: mempool records (`block_height == -1`) lead,
//! then records are compared by explicit timestamp when both carry one, and
//! finally by block height, highest first. See [`SortKey`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::record::{RawTransactionRecord, UNCONFIRMED_HEIGHT};

/// Number of transactions shown in the detail view
pub const DETAIL_LIMIT: usize = 5;

/// Number of transactions shown in the summary view
pub const SUMMARY_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Confirmed,
    Pending,
    Failed,
}

/// Display ordering key
///
/// `Ord` is defined so that ascending order is display order. The tiers are:
///
/// 1. unconfirmed sentinel height before any real height
/// 2. both timestamped: newer first; a timestamped record precedes one without
/// 3. higher block height first
///
/// The lexicographic form keeps the comparison a total order for any mix of
/// records, so sorting never depends on input arrangement beyond stable ties.
/// Comparing timestamps only when both sides carry one, and heights otherwise,
/// is not transitive (it can cycle), so a timestamped record ranks ahead of an
/// untimestamped one even when the latter has the higher block height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub unconfirmed: bool,
    pub timestamp: Option<DateTime<Utc>>,
    pub block_height: i64,
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .unconfirmed
            .cmp(&self.unconfirmed)
            .then_with(|| match (self.timestamp, other.timestamp) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| other.block_height.cmp(&self.block_height))
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Normalized transaction ready for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTransaction {
    pub id: String,
    pub direction: Direction,
    pub amount_sats: u64,
    pub status: TxStatus,
    pub confirmations: u64,
    /// Confirmation time; `None` while pending
    pub occurred_at: Option<DateTime<Utc>>,
    pub sort_key: SortKey,
}

impl CanonicalTransaction {
    pub fn is_incoming(&self) -> bool {
        self.direction == Direction::Incoming
    }
}

/// Normalize and order a sequence of raw records
///
/// No deduplication is performed: an id present twice in the input is present
/// twice in the output.
pub fn normalize(records: &[RawTransactionRecord]) -> Vec<CanonicalTransaction> {
    let mut transactions: Vec<CanonicalTransaction> =
        records.iter().map(normalize_record).collect();
    // Stable: equal keys keep input order (confirmed list before unconfirmed list)
    transactions.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    transactions
}

/// Convert one raw record
pub fn normalize_record(record: &RawTransactionRecord) -> CanonicalTransaction {
    let direction = if record.is_incoming() {
        Direction::Incoming
    } else {
        Direction::Outgoing
    };

    let status = resolve_status(record);

    let confirmations = match status {
        TxStatus::Confirmed => record.confirmations.unwrap_or(0),
        TxStatus::Pending | TxStatus::Failed => 0,
    };

    let explicit_timestamp = record.date.as_deref().and_then(parse_timestamp);
    let confirmed_at = record.confirmed.as_deref().and_then(parse_timestamp);

    let occurred_at = match status {
        TxStatus::Pending => None,
        TxStatus::Confirmed | TxStatus::Failed => explicit_timestamp.or(confirmed_at),
    };

    CanonicalTransaction {
        id: record.tx_hash.clone(),
        direction,
        amount_sats: resolve_amount(record),
        status,
        confirmations,
        occurred_at,
        sort_key: SortKey {
            unconfirmed: record.block_height == UNCONFIRMED_HEIGHT,
            timestamp: explicit_timestamp.or(confirmed_at),
            block_height: record.block_height,
        },
    }
}

/// Amount in satoshis, following the field resolution order
pub fn resolve_amount(record: &RawTransactionRecord) -> u64 {
    let amount = record
        .value
        .or_else(|| {
            record
                .ref_balance
                .filter(|balance| record.is_incoming() && *balance != 0)
        })
        .or_else(|| record.value_satoshis.filter(|value| *value != 0))
        .unwrap_or(0);
    amount.unsigned_abs()
}

fn resolve_status(record: &RawTransactionRecord) -> TxStatus {
    if record.success == Some(false) {
        TxStatus::Failed
    } else if record.confirmed.as_deref().is_some_and(|c| !c.is_empty()) {
        TxStatus::Confirmed
    } else {
        TxStatus::Pending
    }
}

/// Parse RFC 3339 timestamps, and naive ISO-8601 ones as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// First `limit` transactions plus the true total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub items: Vec<CanonicalTransaction>,
    pub total: usize,
}

impl TransactionPage {
    pub fn truncate(transactions: &[CanonicalTransaction], limit: usize) -> Self {
        Self {
            items: transactions.iter().take(limit).cloned().collect(),
            total: transactions.len(),
        }
    }

    pub fn detail(transactions: &[CanonicalTransaction]) -> Self {
        Self::truncate(transactions, DETAIL_LIMIT)
    }

    pub fn summary(transactions: &[CanonicalTransaction]) -> Self {
        Self::truncate(transactions, SUMMARY_LIMIT)
    }

    /// True when a "view more" affordance is needed
    pub fn has_more(&self) -> bool {
        self.total > self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
