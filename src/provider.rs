use async_trait::async_trait;
use std::fmt;

use crate::address::Address;
use crate::error::WatchError;
use crate::network::Network;

/// Freshly generated address with its key material
///
/// `Debug` never prints the private key or mnemonic.
#[derive(Clone)]
pub struct GeneratedAddress {
    pub address: Address,
    /// WIF-encoded private key
    pub private_key_wif: String,
    /// BIP39 mnemonic the key was derived from
    pub mnemonic: String,
}

impl fmt::Debug for GeneratedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedAddress")
            .field("address", &self.address)
            .field("private_key_wif", &"<redacted>")
            .field("mnemonic", &"<redacted>")
            .finish()
    }
}

/// Produces new addresses for a network
#[async_trait]
pub trait AddressProvider: Send + Sync {
    async fn generate(&self, network: Network) -> Result<GeneratedAddress, WatchError>;
}
