use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use donation_watch::WatchError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("{0}")]
    Watch(#[from] WatchError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    NoAddress(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        let status = match &self {
            WalletError::NoAddress(_) | WalletError::Watch(WatchError::NoAddress) => {
                StatusCode::NOT_FOUND
            }
            WalletError::InvalidInput(_) | WalletError::Watch(WatchError::InvalidAddress(_)) => {
                StatusCode::BAD_REQUEST
            }
            WalletError::Watch(WatchError::Network(_)) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
