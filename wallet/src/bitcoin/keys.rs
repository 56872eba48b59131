use async_trait::async_trait;
use bip39::Mnemonic;
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::key::rand;
use bitcoin::key::CompressedPublicKey;
use bitcoin::secp256k1::Secp256k1;
use donation_watch::{Address, AddressProvider, GeneratedAddress, Network, WatchError};
use std::str::FromStr;

/// Derives fresh receive addresses from random BIP39 mnemonics
///
/// Testnet addresses are legacy P2PKH (accepted by every faucet), mainnet
/// addresses are native SegWit P2WPKH.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyManager;

impl KeyManager {
    pub fn new() -> Self {
        Self
    }

    /// Generate a new random mnemonic and derive its first receive address
    pub fn generate_random(network: Network) -> Result<GeneratedAddress, WatchError> {
        let entropy = rand::random::<[u8; 16]>();

        let mnemonic = Mnemonic::from_entropy(&entropy)
            .map_err(|e| WatchError::key_gen(format!("Invalid entropy: {}", e)))?;

        Self::derive_address(mnemonic, network)
    }

    /// Derive the first receive address of an existing mnemonic phrase
    pub fn from_mnemonic(words: &str, network: Network) -> Result<GeneratedAddress, WatchError> {
        let mnemonic = Mnemonic::parse(words)
            .map_err(|e| WatchError::key_gen(format!("Invalid mnemonic: {}", e)))?;

        Self::derive_address(mnemonic, network)
    }

    /// BIP44 path of the first external address: `m/44'/{coin}'/0'/0/0`
    pub fn derivation_path(network: Network) -> String {
        format!("m/44'/{}'/0'/0/0", network.coin_type())
    }

    fn derive_address(mnemonic: Mnemonic, network: Network) -> Result<GeneratedAddress, WatchError> {
        let secp = Secp256k1::new();
        let bitcoin_network = bitcoin::Network::from(network);

        let seed = mnemonic.to_seed("");

        let master_key = Xpriv::new_master(bitcoin_network, &seed)
            .map_err(|e| WatchError::key_gen(e.to_string()))?;

        let path = DerivationPath::from_str(&Self::derivation_path(network))
            .map_err(|e| WatchError::key_gen(e.to_string()))?;

        let child = master_key
            .derive_priv(&secp, &path)
            .map_err(|e| WatchError::key_gen(e.to_string()))?;

        let private_key = child.to_priv();

        let address = match network {
            Network::Testnet => {
                let public_key = private_key.public_key(&secp);
                bitcoin::Address::p2pkh(public_key.pubkey_hash(), bitcoin_network)
            }
            Network::Mainnet => {
                let compressed = CompressedPublicKey::from_private_key(&secp, &private_key)
                    .map_err(|e| WatchError::key_gen(e.to_string()))?;
                bitcoin::Address::p2wpkh(&compressed, bitcoin_network)
            }
        };

        Ok(GeneratedAddress {
            address: Address::new_unchecked(address.to_string(), network),
            private_key_wif: private_key.to_wif(),
            mnemonic: mnemonic.to_string(),
        })
    }
}

#[async_trait]
impl AddressProvider for KeyManager {
    async fn generate(&self, network: Network) -> Result<GeneratedAddress, WatchError> {
        let generated = Self::generate_random(network)?;
        log::info!("🔑 Generated {} address {}", network, generated.address);
        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";

    #[test]
    fn test_testnet_address_is_p2pkh() {
        let generated = KeyManager::from_mnemonic(TEST_MNEMONIC, Network::Testnet).unwrap();
        let address = generated.address.as_str();
        assert!(address.starts_with('m') || address.starts_with('n'), "{}", address);
        assert!(Address::parse(address, Network::Testnet).is_ok());
        assert!(generated.private_key_wif.starts_with('c'));
    }

    #[test]
    fn test_mainnet_address_is_p2wpkh() {
        let generated = KeyManager::from_mnemonic(TEST_MNEMONIC, Network::Mainnet).unwrap();
        let address = generated.address.as_str();
        assert!(address.starts_with("bc1q"), "{}", address);
        assert!(Address::parse(address, Network::Mainnet).is_ok());
        assert!(Address::parse(address, Network::Testnet).is_err());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = KeyManager::from_mnemonic(TEST_MNEMONIC, Network::Testnet).unwrap();
        let b = KeyManager::from_mnemonic(TEST_MNEMONIC, Network::Testnet).unwrap();
        assert_eq!(a.address, b.address);
    }

    #[test]
    fn test_random_generation_yields_distinct_addresses() {
        let a = KeyManager::generate_random(Network::Testnet).unwrap();
        let b = KeyManager::generate_random(Network::Testnet).unwrap();
        assert_ne!(a.address, b.address);
        assert_eq!(a.mnemonic.split_whitespace().count(), 12);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let generated = KeyManager::from_mnemonic(TEST_MNEMONIC, Network::Testnet).unwrap();
        let debug = format!("{:?}", generated);
        assert!(!debug.contains("abandon"));
        assert!(!debug.contains(&generated.private_key_wif));
    }

    #[test]
    fn test_derivation_path() {
        assert_eq!(KeyManager::derivation_path(Network::Mainnet), "m/44'/0'/0'/0/0");
        assert_eq!(KeyManager::derivation_path(Network::Testnet), "m/44'/1'/0'/0/0");
    }

    #[test]
    fn test_invalid_mnemonic() {
        assert!(KeyManager::from_mnemonic("not a mnemonic", Network::Testnet).is_err());
    }
}
