//! Donation-Watch: balance and transaction viewer for a Bitcoin receive address
//!
//! This crate holds everything below the presentation layer: it fetches raw
//! address data from a BlockCypher-compatible explorer, normalizes the
//! transaction records into a stable display order, aggregates balances, and
//! keeps the current address fresh with a single-flight polling loop.
//!
//! # Architecture
//!
//! - **ChainDataFetcher**: One HTTP round-trip per call, raw JSON in, `RawFetchResult` out
//! - **Normalizer**: Raw records to ordered `CanonicalTransaction`s
//! - **Balance**: Confirmed/unconfirmed totals and exact BTC formatting
//! - **PollingController**: At most one armed timer, stale results discarded
//! - **AddressProvider**: Seam for generating new receive addresses
//!
//! # Example
//!
//! ```ignore
//! use donation_watch::{Address, BlockCypherFetcher, DemoFetcher, PollingController, WatchConfig};
//!
//! let config = WatchConfig::from_env()?;
//! let interval = config.poll_interval;
//! let fetcher = Arc::new(DemoFetcher::new(Arc::new(BlockCypherFetcher::new(config)?)));
//!
//! let polling = PollingController::new(fetcher, interval);
//! polling.start(Address::demo()).await?;
//! println!("{:?}", polling.display());
//! ```

// Public modules
pub mod address;
pub mod balance;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod fixtures;
pub mod network;
pub mod normalize;
pub mod polling;
pub mod provider;
pub mod record;
pub mod view;

// Re-exports for convenience
pub use address::{Address, DEMO_TESTNET_ADDRESS, FALLBACK_MAINNET_ADDRESS};
pub use balance::{aggregate, format_btc, BalanceDisplay, BalanceSnapshot};
pub use config::WatchConfig;
pub use error::{NetworkError, WatchError};
pub use fetcher::{BlockCypherFetcher, ChainDataFetcher, DemoFetcher};
pub use network::Network;
pub use normalize::{
    normalize, CanonicalTransaction, Direction, SortKey, TransactionPage, TxStatus,
};
pub use polling::{DisplayState, PollingController, PollingSession, RefreshOutcome};
pub use provider::{AddressProvider, GeneratedAddress};
pub use record::{RawFetchResult, RawTransactionRecord};
pub use view::WalletView;

// Common result type
pub type Result<T> = std::result::Result<T, WatchError>;
