use donation_watch::Address;
use reqwest::Url;
use serde::Serialize;

const QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// QR payload for an address and a remote image rendering it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrCode {
    /// `bitcoin:{address}`
    pub payment_uri: String,
    /// 200x200 image with a 10px margin
    pub image_url: String,
}

impl QrCode {
    pub fn for_address(address: &Address) -> Self {
        let payment_uri = address.payment_uri();
        let image_url = Url::parse_with_params(
            QR_SERVICE,
            &[
                ("data", payment_uri.as_str()),
                ("size", "200x200"),
                ("margin", "10"),
            ],
        )
        .map(String::from)
        .unwrap_or_else(|e| {
            log::warn!("QR image URL for {}: {}", address, e);
            String::new()
        });

        Self {
            payment_uri,
            image_url,
        }
    }
}
