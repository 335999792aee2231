//! # Outbound Ports (Driven Ports)
//!
//! The interface the supply-chain core requires from the host ledger.
//! Consensus, ordering and endorsement live behind this trait and are not
//! modelled here.

use crate::errors::KVStoreError;

/// Ordered `(key, value)` pairs returned by a range scan.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for the ledger's key space.
///
/// Production: `FileBackedKVStore`
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Scan the half-open key range `[start, end)` in ascending lexicographic order.
    ///
    /// An empty or inverted range yields no entries.
    fn range_scan(&self, start: &[u8], end: &[u8]) -> Result<ScanResult, KVStoreError>;
}

/// Batch operation for atomic writes.
///
/// Ledger entries are append/mutate-in-place only, so there is no delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key this operation writes.
    pub fn key(&self) -> &[u8] {
        match self {
            BatchOperation::Put { key, .. } => key,
        }
    }
}
