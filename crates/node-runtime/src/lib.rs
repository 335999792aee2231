//! # Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `fc-node` binary.
//!
//! - `container/` - configuration and the ledger-backed chaincode instance
//! - `cli` - command-line surface
//! - `runner` - metered invocation and `now` timestamp expansion
//! - `simulate` - end-to-end supply-chain scenario

pub mod cli;
pub mod container;
pub mod runner;
pub mod simulate;

pub use container::{ConfigError, NodeConfig, NodeContainer, NodeError, StorageConfig};
