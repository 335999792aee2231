//! # Ledger Transaction
//!
//! Staged write-set for a single invocation. Nothing reaches the store until
//! `commit`, and `commit` hands every staged write to one
//! `atomic_batch_write`. Dropping an uncommitted transaction discards it.

use crate::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use std::collections::BTreeMap;

/// A read-your-writes view over a `KeyValueStore`.
pub struct LedgerTransaction<'a, KV: KeyValueStore + ?Sized> {
    store: &'a mut KV,
    writes: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl<'a, KV: KeyValueStore + ?Sized> LedgerTransaction<'a, KV> {
    /// Open a transaction over `store`.
    pub fn begin(store: &'a mut KV) -> Self {
        Self {
            store,
            writes: BTreeMap::new(),
        }
    }

    /// Read a key, preferring a staged write over the stored value.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self.writes.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.store.get(key),
        }
    }

    pub fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        if self.writes.contains_key(key) {
            return Ok(true);
        }
        self.store.exists(key)
    }

    /// Stage a write. A later write to the same key replaces the earlier one.
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        tracing::debug!(
            key = %String::from_utf8_lossy(key),
            bytes = value.len(),
            "[fc-01] staged write"
        );
        self.writes.insert(key.to_vec(), value.to_vec());
    }

    /// Range scan over `[start, end)` with staged writes merged in.
    pub fn range_scan(&self, start: &[u8], end: &[u8]) -> Result<ScanResult, KVStoreError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.store.range_scan(start, end)?.into_iter().collect();
        if start < end {
            for (key, value) in self.writes.range(start.to_vec()..end.to_vec()) {
                merged.insert(key.clone(), value.clone());
            }
        }
        Ok(merged.into_iter().collect())
    }

    /// Apply every staged write atomically. Returns how many keys were written.
    pub fn commit(self) -> Result<usize, KVStoreError> {
        let count = self.writes.len();
        if count == 0 {
            return Ok(0);
        }
        let operations = self
            .writes
            .into_iter()
            .map(|(key, value)| BatchOperation::put(key, value))
            .collect();
        self.store.atomic_batch_write(operations)?;
        Ok(count)
    }

    /// Drop every staged write. Returns how many keys were discarded.
    pub fn rollback(self) -> usize {
        let count = self.writes.len();
        if count > 0 {
            tracing::debug!(discarded = count, "[fc-01] transaction rolled back");
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKVStore;

    #[test]
    fn test_reads_see_staged_writes() {
        let mut store = InMemoryKVStore::new();
        store.put(b"org1", b"1.0").unwrap();

        let mut tx = LedgerTransaction::begin(&mut store);
        tx.put(b"org1", b"2.0");
        tx.put(b"org2", b"3.0");

        assert_eq!(tx.get(b"org1").unwrap(), Some(b"2.0".to_vec()));
        assert!(tx.exists(b"org2").unwrap());
    }

    #[test]
    fn test_nothing_visible_until_commit() {
        let mut store = InMemoryKVStore::new();
        {
            let mut tx = LedgerTransaction::begin(&mut store);
            tx.put(b"Crude1", b"{}");
            assert_eq!(tx.rollback(), 1);
        }
        assert!(store.is_empty());

        let mut tx = LedgerTransaction::begin(&mut store);
        tx.put(b"Crude1", b"{}");
        assert_eq!(tx.commit().unwrap(), 1);
        assert!(store.exists(b"Crude1").unwrap());
    }

    #[test]
    fn test_drop_without_commit_discards() {
        let mut store = InMemoryKVStore::new();
        {
            let mut tx = LedgerTransaction::begin(&mut store);
            tx.put(b"Plan1", b"{}");
        }
        assert!(!store.exists(b"Plan1").unwrap());
    }

    #[test]
    fn test_range_scan_merges_staged_keys_in_order() {
        let mut store = InMemoryKVStore::new();
        store.put(b"Crude1", b"old").unwrap();
        store.put(b"Crude3", b"c3").unwrap();

        let mut tx = LedgerTransaction::begin(&mut store);
        tx.put(b"Crude2", b"c2");
        tx.put(b"Crude1", b"new");
        tx.put(b"Fuel1", b"f1");

        let scanned = tx.range_scan(b"Crude0", b"Crude999").unwrap();
        let keys: Vec<_> = scanned.iter().map(|(k, _)| k.as_slice()).collect();
        assert_eq!(keys, vec![&b"Crude1"[..], &b"Crude2"[..], &b"Crude3"[..]]);
        assert_eq!(scanned[0].1, b"new".to_vec());
    }

    #[test]
    fn test_empty_commit_is_noop() {
        let mut store = InMemoryKVStore::new();
        let tx = LedgerTransaction::begin(&mut store);
        assert_eq!(tx.commit().unwrap(), 0);
    }
}
