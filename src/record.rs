//! Raw explorer payloads
//!
//! These types accept every record shape seen upstream (BlockCypher `txrefs`,
//! the built-in demo fixture, the legacy donation API) without interpreting
//! it. Interpretation happens in `normalize` and `balance`.

use serde::{Deserialize, Deserializer, Serialize};

/// One transaction reference as delivered by the explorer or a fixture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransactionRecord {
    /// Transaction identifier
    #[serde(default, alias = "hash", alias = "txid")]
    pub tx_hash: String,

    /// Direction hint: negative means the address received funds
    #[serde(default)]
    pub tx_input_n: i64,

    /// Explicit amount in satoshis
    #[serde(
        default,
        alias = "amount",
        alias = "amount_sats",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<i64>,

    /// Address balance after this transaction (used for incoming records without `value`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_balance: Option<i64>,

    /// Alternate amount field used by some sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_satoshis: Option<i64>,

    /// Confirmation timestamp; absent, null or `N/A` while in the mempool
    #[serde(
        default,
        alias = "timestamp",
        deserialize_with = "missing_timestamp_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub confirmed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,

    /// Block height, `-1` for mempool transactions
    #[serde(default = "unconfirmed_height")]
    pub block_height: i64,

    /// Explicit timestamp carried by fixture records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// `false` marks a failed transaction; absent means success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// Block height sentinel for unconfirmed (mempool) transactions
pub const UNCONFIRMED_HEIGHT: i64 = -1;

fn unconfirmed_height() -> i64 {
    UNCONFIRMED_HEIGHT
}

impl RawTransactionRecord {
    pub fn is_incoming(&self) -> bool {
        self.tx_input_n < 0
    }

    pub fn is_unconfirmed_height(&self) -> bool {
        self.block_height == UNCONFIRMED_HEIGHT
    }
}

/// Address endpoint response (`GET {base}/addrs/{address}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFetchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Confirmed balance in satoshis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,

    /// Net mempool balance change in satoshis (may be negative)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unconfirmed_balance: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_balance: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_tx: Option<u64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub txrefs: Vec<RawTransactionRecord>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub unconfirmed_txrefs: Vec<RawTransactionRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_url: Option<String>,
}

impl RawFetchResult {
    /// Merge confirmed and unconfirmed references into one input sequence
    ///
    /// Confirmed references come first. Unconfirmed references lose any
    /// confirmation timestamp and report zero confirmations. Identifiers that
    /// appear in both lists are kept twice.
    pub fn records(&self) -> Vec<RawTransactionRecord> {
        let mut records = Vec::with_capacity(self.txrefs.len() + self.unconfirmed_txrefs.len());
        records.extend(self.txrefs.iter().cloned());
        records.extend(self.unconfirmed_txrefs.iter().cloned().map(|mut tx| {
            tx.confirmed = None;
            tx.confirmations = Some(0);
            tx
        }));
        records
    }

    pub fn has_transactions(&self) -> bool {
        !self.txrefs.is_empty() || !self.unconfirmed_txrefs.is_empty()
    }
}

/// Placeholder the legacy donation API sends for unconfirmed records
const MISSING_TIMESTAMP: &str = "N/A";

fn missing_timestamp_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.trim().is_empty() && raw.trim() != MISSING_TIMESTAMP))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blockcypher_txref_shape() {
        let record: RawTransactionRecord = serde_json::from_value(json!({
            "tx_hash": "ab12",
            "block_height": 2500000,
            "tx_input_n": -1,
            "tx_output_n": 0,
            "value": 15924,
            "ref_balance": 40000,
            "spent": false,
            "confirmations": 12,
            "confirmed": "2024-10-05T10:00:35Z",
            "double_spend": false
        }))
        .unwrap();

        assert_eq!(record.tx_hash, "ab12");
        assert!(record.is_incoming());
        assert_eq!(record.value, Some(15924));
        assert_eq!(record.confirmations, Some(12));
        assert_eq!(record.success, None);
    }

    #[test]
    fn test_alternate_field_names() {
        let record: RawTransactionRecord = serde_json::from_value(json!({
            "txid": "cd34",
            "amount_sats": 700,
            "confirmations": 3,
            "timestamp": "2024-10-05T10:00:35"
        }))
        .unwrap();

        assert_eq!(record.tx_hash, "cd34");
        assert_eq!(record.value, Some(700));
        assert_eq!(record.confirmed.as_deref(), Some("2024-10-05T10:00:35"));
        assert!(!record.is_incoming());

        let tx = crate::normalize::normalize_record(&record);
        assert_eq!(tx.status, crate::normalize::TxStatus::Confirmed);
        assert_eq!(tx.confirmations, 3);
        assert_eq!(
            tx.occurred_at,
            crate::normalize::parse_timestamp("2024-10-05T10:00:35Z")
        );
    }

    #[test]
    fn test_missing_timestamp_placeholder_is_pending() {
        let record: RawTransactionRecord = serde_json::from_value(json!({
            "txid": "ef56",
            "amount_sats": 1200,
            "confirmations": 0,
            "timestamp": "N/A"
        }))
        .unwrap();

        assert_eq!(record.confirmed, None);
        assert!(record.is_unconfirmed_height());

        let tx = crate::normalize::normalize_record(&record);
        assert_eq!(tx.status, crate::normalize::TxStatus::Pending);
        assert_eq!(tx.occurred_at, None);
    }

    #[test]
    fn test_missing_and_null_lists() {
        let raw: RawFetchResult = serde_json::from_value(json!({
            "address": "mwCwTceJvYV27KXBc3NJZys6CjsgsoeHmf",
            "balance": 0,
            "txrefs": null
        }))
        .unwrap();

        assert!(raw.txrefs.is_empty());
        assert!(raw.unconfirmed_txrefs.is_empty());
        assert!(!raw.has_transactions());
        assert!(raw.records().is_empty());
    }

    #[test]
    fn test_records_marks_unconfirmed_entries() {
        let confirmed = RawTransactionRecord {
            tx_hash: "same".into(),
            confirmed: Some("2024-10-05T10:00:35Z".into()),
            confirmations: Some(4),
            block_height: 100,
            ..Default::default()
        };
        let mempool = RawTransactionRecord {
            confirmed: Some("stale".into()),
            confirmations: Some(9),
            ..confirmed.clone()
        };
        let raw = RawFetchResult {
            txrefs: vec![confirmed.clone()],
            unconfirmed_txrefs: vec![mempool],
            ..Default::default()
        };

        let records = raw.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], confirmed);
        assert_eq!(records[1].tx_hash, "same");
        assert_eq!(records[1].confirmed, None);
        assert_eq!(records[1].confirmations, Some(0));
    }
}
