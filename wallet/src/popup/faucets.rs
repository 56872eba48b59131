use donation_watch::Network;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Faucet {
    pub name: &'static str,
    pub url: &'static str,
}

pub const TESTNET_FAUCETS: &[Faucet] = &[
    Faucet {
        name: "Coinfaucet.eu",
        url: "https://coinfaucet.eu/en/btc-testnet/",
    },
    Faucet {
        name: "BitcoinFaucet.tk",
        url: "https://bitcoinfaucet.uo1.net/",
    },
    Faucet {
        name: "TestBTC.info",
        url: "https://testnet.help/en/btcfaucet/testnet",
    },
    Faucet {
        name: "Bitcoin Testnet Sandbox",
        url: "https://bitcoinfaucet.uo1.net/send.php",
    },
];

/// Faucets shown for a network (none on mainnet)
pub fn faucets_for(network: Network) -> &'static [Faucet] {
    match network {
        Network::Testnet => TESTNET_FAUCETS,
        Network::Mainnet => &[],
    }
}
