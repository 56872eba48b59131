//! Error types for donation-watch operations
//!
//! Two layers: `NetworkError` describes a failed explorer round-trip (HTTP
//! status, timeout, transport, undecodable body) and `WatchError` is what the
//! action boundary sees. Nothing here is fatal; every failing action can be
//! retried by the user.

use thiserror::Error;

/// Failure of a single explorer request
///
/// A body that cannot be decoded is reported as a network failure too: from
/// the caller's point of view the explorer did not deliver usable data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Explorer answered with a non-success HTTP status
    #[error("Network response was not ok: {0}")]
    Status(u16),

    /// Request exceeded the configured fetch timeout
    #[error("Request timed out")]
    Timeout,

    /// Connection, DNS or protocol failure
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body was not the expected JSON
    #[error("Malformed explorer response: {0}")]
    Decode(String),
}

impl NetworkError {
    /// HTTP status code, when the explorer answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Core error type for address generation and polling
#[derive(Error, Debug)]
pub enum WatchError {
    /// Address derivation failed
    #[error("Key generation failed: {0}")]
    KeyGen(String),

    /// Explorer fetch failed (includes malformed JSON)
    #[error("{0}")]
    Network(#[from] NetworkError),

    /// Address string is not valid for the selected network
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// An action needed a current address and there is none
    #[error("No address to fetch data for")]
    NoAddress,

    /// Configuration value could not be used
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WatchError {
    /// Create a key generation error
    pub fn key_gen(msg: impl Into<String>) -> Self {
        Self::KeyGen(msg.into())
    }

    /// True for failures of the explorer round-trip
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
