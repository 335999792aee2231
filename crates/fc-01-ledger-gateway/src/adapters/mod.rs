//! Storage Adapters
//!
//! Implementations of the `KeyValueStore` trait. Both keep keys in a
//! `BTreeMap` so range scans come back sorted without an extra pass.

mod file;
mod memory;

pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;

use crate::ports::outbound::{BatchOperation, ScanResult};
use std::collections::BTreeMap;

pub(crate) type OrderedMap = BTreeMap<Vec<u8>, Vec<u8>>;

pub(crate) fn scan_range(data: &OrderedMap, start: &[u8], end: &[u8]) -> ScanResult {
    // BTreeMap::range panics on an inverted range.
    if start >= end {
        return Vec::new();
    }
    data.range(start.to_vec()..end.to_vec())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

pub(crate) fn apply_batch(data: &mut OrderedMap, operations: Vec<BatchOperation>) {
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => {
                data.insert(key, value);
            }
        }
    }
}
