/// Wallet Manager - Orchestration Layer
///
/// Coordinates the popup actions: address selection and generation,
/// preference persistence, polling and status messages.
use donation_watch::{
    Address, AddressProvider, BlockCypherFetcher, ChainDataFetcher, DemoFetcher, Network,
    PollingController, RefreshOutcome,
};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::types::{AddressHistoryResponse, CopyAddressResponse};
use crate::bitcoin::KeyManager;
use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::popup::{PopupView, StatusBoard, SummaryView};
use crate::storage::{PreferenceStore, Preferences};

struct ManagerState {
    prefs: Preferences,
    network: Network,
}

pub struct WalletManager {
    pub config: WalletConfig,
    store: PreferenceStore,
    provider: Arc<dyn AddressProvider>,
    polling: PollingController,
    status: StatusBoard,
    state: Mutex<ManagerState>,
}

impl WalletManager {
    // ============================================================================
    // Constructor
    // ============================================================================

    pub fn new(config: WalletConfig) -> Result<Self, WalletError> {
        let fetcher = BlockCypherFetcher::new(config.watch.clone())?;
        let store = PreferenceStore::new_with_base_dir(config.data_dir.clone());

        Ok(Self::with_parts(
            config,
            store,
            Arc::new(fetcher),
            Arc::new(KeyManager::new()),
        ))
    }

    /// Create WalletManager with custom storage, fetcher and address source (for testing)
    pub fn with_parts(
        config: WalletConfig,
        store: PreferenceStore,
        fetcher: Arc<dyn ChainDataFetcher>,
        provider: Arc<dyn AddressProvider>,
    ) -> Self {
        let fetcher: Arc<dyn ChainDataFetcher> = Arc::new(DemoFetcher::new(fetcher));
        let polling = PollingController::new(fetcher, config.watch.poll_interval);
        let network = config.default_network;

        Self {
            config,
            store,
            provider,
            polling,
            status: StatusBoard::new(),
            state: Mutex::new(ManagerState {
                prefs: Preferences::default(),
                network,
            }),
        }
    }

    pub fn polling(&self) -> &PollingController {
        &self.polling
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    pub async fn network(&self) -> Network {
        self.state.lock().await.network
    }

    // ============================================================================
    // Actions
    // ============================================================================

    /// Load preferences and show the saved address, or pick a new one
    pub async fn startup(&self) -> Result<PopupView, WalletError> {
        let loaded = self.store.load().unwrap_or_else(|e| {
            log::warn!("Error loading preferences, starting fresh: {}", e);
            Preferences::default()
        });
        let network = loaded.network_or(self.config.default_network);
        let saved = loaded.current_address.clone();

        {
            let mut state = self.state.lock().await;
            state.prefs = loaded;
            state.network = network;
        }
        log::info!("🚀 Starting on {}", network);

        match saved.map(|raw| Address::parse(&raw, network)) {
            Some(Ok(address)) => {
                log::info!("Resuming saved address {}", address);
                self.show(address, false).await;
                Ok(self.popup_view().await)
            }
            Some(Err(e)) => {
                log::warn!("Discarding saved address: {}", e);
                self.generate_new_address().await
            }
            None => self.generate_new_address().await,
        }
    }

    /// Replace the current address and restart polling for it
    ///
    /// First testnet use shows the demo address. If key generation fails,
    /// the network's fallback address is shown without being saved.
    pub async fn generate_new_address(&self) -> Result<PopupView, WalletError> {
        let address = {
            let mut state = self.state.lock().await;
            let network = state.network;

            if network.is_testnet() && state.prefs.is_first_use() && self.config.demo_on_first_use
            {
                let demo = Address::demo();
                state.prefs.remember(&demo);
                self.persist(&state.prefs);
                self.status.info("Demo address generated!");
                demo
            } else {
                match self.provider.generate(network).await {
                    Ok(generated) => {
                        // Key material is dropped here
                        let address = generated.address;
                        state.prefs.remember(&address);
                        self.persist(&state.prefs);
                        self.status.info("New address generated!");
                        address
                    }
                    Err(e) => {
                        log::error!("Error generating address: {}", e);
                        self.status.error("Error generating address");
                        Address::fallback(network)
                    }
                }
            }
        };

        self.show(address, true).await;
        Ok(self.popup_view().await)
    }

    /// Current address for the clipboard
    pub fn copy_address(&self) -> Result<CopyAddressResponse, WalletError> {
        match self.polling.current_address() {
            Some(address) => {
                self.status.info("Address copied to clipboard!");
                Ok(CopyAddressResponse {
                    address: address.to_string(),
                })
            }
            None => {
                self.status.error("No address to copy");
                Err(WalletError::NoAddress("No address to copy".to_string()))
            }
        }
    }

    /// User-initiated refresh; fetch failures are returned as errors
    pub async fn refresh(&self) -> Result<PopupView, WalletError> {
        match self.polling.refresh().await {
            Ok(outcome) => {
                self.report(&outcome, false);
                Ok(self.popup_view().await)
            }
            Err(e) => {
                self.status.error(format!("Error: {}", e));
                Err(e.into())
            }
        }
    }

    /// Persist the network choice, then generate an address for it
    pub async fn set_network(&self, testnet: bool) -> Result<PopupView, WalletError> {
        let network = Network::from_testnet_flag(testnet);
        {
            let mut state = self.state.lock().await;
            state.network = network;
            state.prefs.set_network(network);
            self.persist(&state.prefs);
        }
        log::info!("Network switched to {}", network);

        self.generate_new_address().await
    }

    pub async fn popup_view(&self) -> PopupView {
        let network = self.network().await;
        PopupView::build(network, &self.polling.display(), self.status.current())
    }

    pub async fn summary_view(&self) -> SummaryView {
        let network = self.network().await;
        SummaryView::build(network, &self.polling.display())
    }

    pub async fn address_history(&self) -> AddressHistoryResponse {
        let state = self.state.lock().await;
        AddressHistoryResponse {
            network: state.network,
            current_address: self.polling.current_address().map(|a| a.to_string()),
            addresses: state.prefs.generated_addresses.clone(),
        }
    }

    /// Disarm polling
    pub fn shutdown(&self) {
        self.polling.stop();
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    async fn show(&self, address: Address, quiet: bool) {
        match self.polling.start(address).await {
            Ok(outcome) => self.report(&outcome, quiet),
            Err(e) => self.status.error(format!("Error: {}", e)),
        }
    }

    fn report(&self, outcome: &RefreshOutcome, quiet: bool) {
        if quiet {
            return;
        }
        if let RefreshOutcome::Applied(view) = outcome {
            if view.address.is_demo() {
                self.status.info("Loaded mempool transactions!");
            } else if view.has_transactions() {
                self.status.info("Balance and transactions updated");
            } else {
                self.status.info("No transactions found for this address");
            }
        }
    }

    fn persist(&self, prefs: &Preferences) {
        if let Err(e) = self.store.save(prefs) {
            log::warn!("Error saving preferences: {}", e);
        }
    }
}

impl Drop for WalletManager {
    fn drop(&mut self) {
        self.polling.stop();
    }
}
