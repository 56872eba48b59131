use donation_watch::Network;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct SetNetworkRequest {
    pub testnet: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CopyAddressResponse {
    pub address: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AddressHistoryResponse {
    pub network: Network,
    pub current_address: Option<String>,
    pub addresses: Vec<String>,
}
