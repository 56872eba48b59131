//! Popup backend for the donation-address viewer
//!
//! Generates receive addresses, persists the user's preferences, drives the
//! polling controller from `donation_watch` and exposes the popup actions
//! over a small HTTP API.

pub mod api;
pub mod bitcoin;
pub mod config;
pub mod error;
pub mod manager;
pub mod popup;
pub mod storage;

pub use config::WalletConfig;
pub use error::{StorageError, WalletError};
pub use manager::WalletManager;
