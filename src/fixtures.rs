//! Built-in data for the demo address
//!
//! The demo address is shown to first-time testnet users. Its data never
//! comes from the network: one mempool receive, two confirmed receives and
//! one failed transaction.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::address::DEMO_TESTNET_ADDRESS;
use crate::record::{RawFetchResult, RawTransactionRecord, UNCONFIRMED_HEIGHT};

pub const DEMO_CONFIRMED_BALANCE: i64 = 11_729_789_710;
pub const DEMO_UNCONFIRMED_BALANCE: i64 = 15_924;

/// Demo fixture with the mempool record stamped at the current time
pub fn demo_fetch_result() -> RawFetchResult {
    demo_fetch_result_at(Utc::now())
}

pub fn demo_fetch_result_at(now: DateTime<Utc>) -> RawFetchResult {
    RawFetchResult {
        address: Some(DEMO_TESTNET_ADDRESS.to_string()),
        balance: Some(DEMO_CONFIRMED_BALANCE),
        unconfirmed_balance: Some(DEMO_UNCONFIRMED_BALANCE),
        final_balance: Some(DEMO_CONFIRMED_BALANCE + DEMO_UNCONFIRMED_BALANCE),
        n_tx: Some(4),
        txrefs: demo_records(now),
        unconfirmed_txrefs: Vec::new(),
        tx_url: None,
    }
}

fn demo_records(now: DateTime<Utc>) -> Vec<RawTransactionRecord> {
    vec![
        RawTransactionRecord {
            tx_hash: "00c3404c9f00559b8da74c7214f21875ba2d23c97774271aacca659d21e7dd5".into(),
            tx_input_n: -1,
            value: Some(15_924),
            confirmed: None,
            confirmations: Some(0),
            block_height: UNCONFIRMED_HEIGHT,
            date: Some(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
            success: Some(true),
            ..Default::default()
        },
        confirmed_record(
            "afc7d05f60de12f21db241467515f47e38cfb791edba33119957170731399aa2c",
            10_000,
            "2024-10-05T10:00:35",
            1_110_859,
            1_039_712,
        ),
        confirmed_record(
            "ba2759ba21f0c4f54f23450c9bb1f237d92b285982e995c19b0ee3afcb69d6ba",
            18_597,
            "2024-08-15T18:33:26",
            1_273_943,
            1_020_296,
        ),
        RawTransactionRecord {
            tx_hash: "ff4c8e91a2d03e78b5f3b1d36c1089562fa830ef672bacd87901f7b362538af9".into(),
            tx_input_n: -1,
            value: Some(5_000),
            confirmed: Some("2024-07-22T14:15:20".into()),
            confirmations: Some(0),
            block_height: UNCONFIRMED_HEIGHT,
            date: Some("2024-07-22T14:15:20".into()),
            success: Some(false),
            ..Default::default()
        },
    ]
}

fn confirmed_record(
    hash: &str,
    value: i64,
    confirmed: &str,
    confirmations: u64,
    block_height: i64,
) -> RawTransactionRecord {
    RawTransactionRecord {
        tx_hash: hash.into(),
        tx_input_n: -1,
        value: Some(value),
        confirmed: Some(confirmed.into()),
        confirmations: Some(confirmations),
        block_height,
        date: Some(confirmed.into()),
        success: Some(true),
        ..Default::default()
    }
}
