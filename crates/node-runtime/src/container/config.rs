//! # Node Configuration
//!
//! Storage location plus the chaincode configuration, with defaults that can
//! be overridden from the environment and then from command-line flags.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FC_DATA_FILE` | `./data/ledger.db` | Ledger file |
//! | `FC_INITIAL_BALANCE` | `100000` | Starting balance of every account |

use fc_02_supply_chain::domain::config::ConfigError as ChaincodeConfigError;
use fc_02_supply_chain::SupplyChainConfig;
use std::path::PathBuf;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Roles, starting balance and settlement policy.
    pub chaincode: SupplyChainConfig,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}='{value}' is not a valid number")]
    InvalidNumber { var: &'static str, value: String },

    #[error("data file path must not be empty")]
    EmptyDataFile,

    #[error(transparent)]
    Chaincode(#[from] ChaincodeConfigError),
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// File holding the ledger key space.
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./data/ledger.db"),
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by `FC_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as `from_env` with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup("FC_DATA_FILE") {
            config.storage.data_file = PathBuf::from(path);
        }

        if let Some(raw) = lookup("FC_INITIAL_BALANCE") {
            config.chaincode.initial_balance =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: "FC_INITIAL_BALANCE",
                        value: raw.clone(),
                    })?;
        }

        Ok(config)
    }

    /// Defaults with the ledger at `data_file`.
    pub fn for_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageConfig {
                data_file: data_file.into(),
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataFile);
        }
        self.chaincode.validate()?;
        Ok(())
    }
}
