//! Bitcoin key operations
//!
//! - BIP39 mnemonic generation
//! - BIP44 derivation of the first receive address

pub mod keys;

// Re-export main types
pub use keys::KeyManager;
