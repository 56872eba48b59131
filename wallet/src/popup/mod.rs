//! Presentation model for the popup
//!
//! - Popup and summary views built from the polling display state
//! - QR payload and image URL
//! - Testnet faucet links
//! - Expiring status messages

pub mod faucets;
pub mod qr;
pub mod status;
pub mod view;

pub use faucets::{faucets_for, Faucet, TESTNET_FAUCETS};
pub use qr::QrCode;
pub use status::{StatusBoard, StatusMessage, STATUS_TTL_SECS};
pub use view::{AddressPanel, PopupView, SummaryView, TransactionRow, ViewAllLink};
