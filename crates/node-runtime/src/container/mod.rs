//! # Node Container
//!
//! Owns the configuration and the chaincode bound to the file-backed ledger.
//! Every committed invocation is flushed to the ledger file by the store.

pub mod config;

pub use config::{ConfigError, NodeConfig, StorageConfig};

use fc_01_ledger_gateway::{FileBackedKVStore, KVStoreError};
use fc_02_supply_chain::SupplyChainService;
use thiserror::Error;
use tracing::info;

/// Node-level failures.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to open ledger: {0}")]
    Storage(#[from] KVStoreError),
}

/// The running node: configuration plus the chaincode over its ledger file.
pub struct NodeContainer {
    config: NodeConfig,
    service: SupplyChainService<FileBackedKVStore>,
}

impl NodeContainer {
    /// Validate `config` and open (or create) the ledger file.
    pub fn open(config: NodeConfig) -> Result<Self, NodeError> {
        config.validate()?;

        let store = FileBackedKVStore::open(&config.storage.data_file)?;
        info!(
            data_file = %config.storage.data_file.display(),
            "[fc-node] Ledger opened"
        );

        let service = SupplyChainService::new(store, config.chaincode.clone());
        Ok(Self { config, service })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn service(&self) -> &SupplyChainService<FileBackedKVStore> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut SupplyChainService<FileBackedKVStore> {
        &mut self.service
    }
}
