//! # Ledger Gateway (fc-01)
//!
//! The Ledger Gateway is the only way the supply-chain core touches persistent
//! state. It models the host ledger as a sorted key space with point reads,
//! point writes and half-open range scans.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `ports/` - The `KeyValueStore` driven port
//! - `adapters/` - `InMemoryKVStore` (tests, simulation) and `FileBackedKVStore` (node)
//! - `transaction.rs` - `LedgerTransaction`, the staged write-set of one invocation
//!
//! ## Atomicity
//!
//! | Guarantee | Enforced by |
//! |-----------|-------------|
//! | Read-your-writes inside one invocation | `LedgerTransaction::get` |
//! | All writes of an invocation or none | `LedgerTransaction::commit` → `atomic_batch_write` |
//! | Sorted range scans | `BTreeMap` in both adapters |
//!
//! ## Usage
//!
//! ```ignore
//! use fc_01_ledger_gateway::{InMemoryKVStore, LedgerTransaction};
//!
//! let mut store = InMemoryKVStore::new();
//! let mut tx = LedgerTransaction::begin(&mut store);
//! tx.put(b"org1", b"100000.0");
//! tx.commit()?;
//! ```

pub mod adapters;
pub mod errors;
pub mod ports;
pub mod transaction;

pub use adapters::{FileBackedKVStore, InMemoryKVStore};
pub use errors::KVStoreError;
pub use ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
pub use transaction::LedgerTransaction;
