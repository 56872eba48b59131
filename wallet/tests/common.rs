//! Common test utilities for wallet integration tests
//!
//! Every environment runs its own explorer mock on an ephemeral port and
//! keeps preferences in a temporary directory.

#![allow(dead_code)]

use async_trait::async_trait;
use donation_watch::{
    AddressProvider, BlockCypherFetcher, GeneratedAddress, Network, WatchError,
};
use explorer_mock::{create_router, FixtureStore};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use wallet::storage::{PreferenceStore, Preferences};
use wallet::{WalletConfig, WalletManager};

pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Address source that always fails
pub struct FailingProvider;

#[async_trait]
impl AddressProvider for FailingProvider {
    async fn generate(&self, _network: Network) -> Result<GeneratedAddress, WatchError> {
        Err(WatchError::key_gen("entropy source unavailable"))
    }
}

/// Test environment with automatic cleanup
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub explorer: Arc<FixtureStore>,
    pub explorer_url: String,
    pub config: WalletConfig,
    pub manager: Arc<WalletManager>,
    explorer_task: JoinHandle<()>,
}

impl TestEnvironment {
    pub async fn new() -> anyhow::Result<Self> {
        Self::build(|_| {}, None).await
    }

    /// Environment with adjusted configuration
    pub async fn with_config(adjust: impl FnOnce(&mut WalletConfig)) -> anyhow::Result<Self> {
        Self::build(adjust, None).await
    }

    /// Environment whose address generation always fails
    pub async fn with_failing_keys(
        adjust: impl FnOnce(&mut WalletConfig),
    ) -> anyhow::Result<Self> {
        Self::build(adjust, Some(Arc::new(FailingProvider))).await
    }

    async fn build(
        adjust: impl FnOnce(&mut WalletConfig),
        provider: Option<Arc<dyn AddressProvider>>,
    ) -> anyhow::Result<Self> {
        init_logging();

        let temp_dir = TempDir::new()?;
        log::info!("📁 Test directory: {:?}", temp_dir.path());

        let explorer = Arc::new(FixtureStore::seeded());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let explorer_url = format!("http://{}", listener.local_addr()?);
        let router = create_router(explorer.clone());
        let explorer_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                log::warn!("Explorer mock stopped: {}", e);
            }
        });

        let mut config = WalletConfig::default();
        config.watch = config.watch.with_explorer_root(&explorer_url);
        config.data_dir = temp_dir.path().to_path_buf();
        adjust(&mut config);

        let manager = match provider {
            Some(provider) => WalletManager::with_parts(
                config.clone(),
                PreferenceStore::new_with_base_dir(config.data_dir.clone()),
                Arc::new(BlockCypherFetcher::new(config.watch.clone())?),
                provider,
            ),
            None => WalletManager::new(config.clone())?,
        };

        Ok(Self {
            temp_dir,
            explorer,
            explorer_url,
            config,
            manager: Arc::new(manager),
            explorer_task,
        })
    }

    /// Preferences as currently saved on disk
    pub fn saved_preferences(&self) -> Preferences {
        PreferenceStore::new_with_base_dir(self.config.data_dir.clone())
            .load()
            .unwrap()
    }

    /// Write preferences before `startup`
    pub fn save_preferences(&self, prefs: &Preferences) {
        PreferenceStore::new_with_base_dir(self.config.data_dir.clone())
            .save(prefs)
            .unwrap();
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        self.manager.shutdown();
        self.explorer_task.abort();
    }
}
