use axum::{extract::State, Json};
use std::sync::Arc;

use super::types::{AddressHistoryResponse, CopyAddressResponse, SetNetworkRequest};
use crate::error::WalletError;
use crate::manager::WalletManager;
use crate::popup::{PopupView, SummaryView};

pub async fn popup_handler(State(manager): State<Arc<WalletManager>>) -> Json<PopupView> {
    Json(manager.popup_view().await)
}

pub async fn summary_handler(State(manager): State<Arc<WalletManager>>) -> Json<SummaryView> {
    Json(manager.summary_view().await)
}

pub async fn generate_address_handler(
    State(manager): State<Arc<WalletManager>>,
) -> Result<Json<PopupView>, WalletError> {
    let view = manager.generate_new_address().await?;
    Ok(Json(view))
}

pub async fn copy_address_handler(
    State(manager): State<Arc<WalletManager>>,
) -> Result<Json<CopyAddressResponse>, WalletError> {
    let response = manager.copy_address()?;
    Ok(Json(response))
}

pub async fn address_history_handler(
    State(manager): State<Arc<WalletManager>>,
) -> Json<AddressHistoryResponse> {
    Json(manager.address_history().await)
}

pub async fn refresh_handler(
    State(manager): State<Arc<WalletManager>>,
) -> Result<Json<PopupView>, WalletError> {
    let view = manager.refresh().await?;
    Ok(Json(view))
}

pub async fn set_network_handler(
    State(manager): State<Arc<WalletManager>>,
    Json(req): Json<SetNetworkRequest>,
) -> Result<Json<PopupView>, WalletError> {
    let view = manager.set_network(req.testnet).await?;
    Ok(Json(view))
}
