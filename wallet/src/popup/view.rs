//! Popup and summary views
//!
//! Both are plain data built from the polling controller's display state;
//! the UI renders them without further interpretation.

use donation_watch::view::{address_link, short_id, transaction_link};
use donation_watch::{
    format_btc, Address, BalanceDisplay, CanonicalTransaction, Direction, DisplayState, Network,
    TransactionPage, TxStatus, WalletView,
};
use serde::Serialize;

use super::faucets::{faucets_for, Faucet};
use super::qr::QrCode;
use super::status::StatusMessage;

const NO_TRANSACTIONS: &str = "No transactions yet";
const LOADING_TRANSACTIONS: &str = "Loading transactions...";
const NO_ADDRESS: &str = "Click 'Generate New Address' button";

#[derive(Debug, Clone, Serialize)]
pub struct AddressPanel {
    pub address: String,
    pub network: Network,
    pub qr: QrCode,
    pub explorer_url: String,
    pub is_demo: bool,
}

impl AddressPanel {
    pub fn new(address: &Address) -> Self {
        Self {
            address: address.to_string(),
            network: address.network(),
            qr: QrCode::for_address(address),
            explorer_url: address_link(address),
            is_demo: address.is_demo(),
        }
    }
}

/// One rendered transaction line
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub short_id: String,
    pub explorer_url: String,
    pub direction: Direction,
    pub status: TxStatus,
    pub amount_sats: u64,
    /// Signed amount with unit, e.g. `+0.00015924 tBTC`
    pub amount_text: String,
    /// UTC timestamp or `Pending - Mempool`
    pub date_text: String,
    /// `N confirmations`, `pending` or `failed`
    pub confirmation_text: String,
}

impl TransactionRow {
    pub fn new(tx: &CanonicalTransaction, address: &Address) -> Self {
        Self {
            id: tx.id.clone(),
            short_id: short_id(&tx.id),
            explorer_url: transaction_link(address, &tx.id),
            direction: tx.direction,
            status: tx.status,
            amount_sats: tx.amount_sats,
            amount_text: amount_text(tx, address.network()),
            date_text: date_text(tx),
            confirmation_text: confirmation_text(tx),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewAllLink {
    pub text: String,
    pub url: String,
}

/// Everything the popup shows
#[derive(Debug, Clone, Serialize)]
pub struct PopupView {
    pub network: Network,
    pub unit: &'static str,
    pub address: Option<AddressPanel>,
    pub loading: bool,
    pub balance_text: String,
    pub balance: Option<BalanceDisplay>,
    pub transactions: Vec<TransactionRow>,
    pub total_transactions: usize,
    pub view_all: Option<ViewAllLink>,
    pub empty_message: Option<String>,
    pub faucets: Vec<Faucet>,
    pub status: Option<StatusMessage>,
    pub error: Option<String>,
}

impl PopupView {
    pub fn build(network: Network, display: &DisplayState, status: Option<StatusMessage>) -> Self {
        let mut view = Self {
            network,
            unit: network.unit(),
            address: display.address().map(AddressPanel::new),
            loading: display.is_loading(),
            balance_text: zero_balance_text(network),
            balance: None,
            transactions: Vec::new(),
            total_transactions: 0,
            view_all: None,
            empty_message: None,
            faucets: faucets_for(network).to_vec(),
            status,
            error: None,
        };

        match display {
            DisplayState::Empty => view.empty_message = Some(NO_ADDRESS.to_string()),
            DisplayState::Loading(_) => {
                view.empty_message = Some(LOADING_TRANSACTIONS.to_string());
            }
            DisplayState::Ready(wallet) => view.fill(wallet),
            DisplayState::Unavailable { view: wallet, error } => {
                view.fill(wallet);
                view.error = Some(error.clone());
            }
        }

        view
    }

    fn fill(&mut self, wallet: &WalletView) {
        let network = wallet.address.network();
        self.balance_text = wallet.balance.display_text(network);
        self.balance = Some(wallet.balance.formatted());

        let page = wallet.detail();
        self.transactions = rows(&page, &wallet.address);
        self.total_transactions = page.total;
        if page.has_more() {
            self.view_all = Some(ViewAllLink {
                text: format!("View all {} transactions", page.total),
                url: address_link(&wallet.address),
            });
        }
        if page.is_empty() {
            self.empty_message = Some(NO_TRANSACTIONS.to_string());
        }
    }
}

/// Balance and the three most recent transactions
#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub network: Network,
    pub address: Option<String>,
    pub loading: bool,
    pub balance_text: String,
    pub transactions: Vec<TransactionRow>,
    pub total_transactions: usize,
}

impl SummaryView {
    pub fn build(network: Network, display: &DisplayState) -> Self {
        let mut summary = Self {
            network,
            address: display.address().map(|address| address.to_string()),
            loading: display.is_loading(),
            balance_text: zero_balance_text(network),
            transactions: Vec::new(),
            total_transactions: 0,
        };

        if let Some(wallet) = display.view() {
            let page = wallet.summary();
            summary.balance_text = wallet.balance.display_text(wallet.address.network());
            summary.transactions = rows(&page, &wallet.address);
            summary.total_transactions = page.total;
        }

        summary
    }
}

fn rows(page: &TransactionPage, address: &Address) -> Vec<TransactionRow> {
    page.items
        .iter()
        .map(|tx| TransactionRow::new(tx, address))
        .collect()
}

fn zero_balance_text(network: Network) -> String {
    format!("{} {}", format_btc(0u64), network.unit())
}

fn amount_text(tx: &CanonicalTransaction, network: Network) -> String {
    let sign = if tx.is_incoming() { '+' } else { '-' };
    format!("{}{} {}", sign, format_btc(tx.amount_sats), network.unit())
}

fn date_text(tx: &CanonicalTransaction) -> String {
    match tx.occurred_at {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "Pending - Mempool".to_string(),
    }
}

fn confirmation_text(tx: &CanonicalTransaction) -> String {
    match tx.status {
        TxStatus::Failed => "failed".to_string(),
        TxStatus::Pending => "pending".to_string(),
        TxStatus::Confirmed if tx.confirmations == 1 => "1 confirmation".to_string(),
        TxStatus::Confirmed => format!("{} confirmations", tx.confirmations),
    }
}
