use super::{apply_batch, scan_range, OrderedMap};
use crate::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed key-value store for a single-node ledger.
///
/// The whole key space is held in memory and rewritten to disk after every
/// write. Records use a length-prefixed layout:
/// `[key_len:u32 LE][key][value_len:u32 LE][value]...`
///
/// Saves go through a temp file + rename, so the file on disk is always the
/// state after the last successful batch.
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: OrderedMap,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open (or create on first write) the store at `path`.
    ///
    /// A missing file is an empty ledger; a truncated file is a
    /// `CorruptionError`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data = decode(&bytes)?;
                tracing::info!(
                    "[fc-01] Loaded {} keys from {} ({} bytes)",
                    data.len(),
                    path.display(),
                    bytes.len()
                );
                data
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("[fc-01] No existing ledger file at {}", path.display());
                OrderedMap::new()
            }
            Err(err) => return Err(KVStoreError::io(err)),
        };

        Ok(Self { data, path })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(KVStoreError::io)?;
            }
        }

        let bytes = encode(&self.data);

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(KVStoreError::io)?;
        file.write_all(&bytes).map_err(KVStoreError::io)?;
        file.sync_all().map_err(KVStoreError::io)?;

        std::fs::rename(&temp_path, &self.path).map_err(KVStoreError::io)?;

        tracing::debug!(
            "[fc-01] Persisted {} keys to {}",
            self.data.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn encode(data: &OrderedMap) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (key, value) in data {
        bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
        bytes.extend_from_slice(key);
        bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
        bytes.extend_from_slice(value);
    }
    bytes
}

fn decode(bytes: &[u8]) -> Result<OrderedMap, KVStoreError> {
    let mut data = OrderedMap::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let key = read_chunk(bytes, &mut cursor)?;
        let value = read_chunk(bytes, &mut cursor)?;
        data.insert(key, value);
    }

    Ok(data)
}

fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let truncated = |at: usize| KVStoreError::CorruptionError {
        message: format!("truncated record at byte {}", at),
    };

    let len_end = cursor.checked_add(4).ok_or_else(|| truncated(*cursor))?;
    let len_bytes: [u8; 4] = bytes
        .get(*cursor..len_end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| truncated(*cursor))?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let end = len_end.checked_add(len).ok_or_else(|| truncated(len_end))?;
    let chunk = bytes.get(len_end..end).ok_or_else(|| truncated(len_end))?;
    *cursor = end;
    Ok(chunk.to_vec())
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        // Apply to a copy first so a failed save leaves memory and disk in agreement.
        let mut next = self.data.clone();
        apply_batch(&mut next, operations);
        let previous = std::mem::replace(&mut self.data, next);
        if let Err(err) = self.save_to_file() {
            self.data = previous;
            return Err(err);
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn range_scan(&self, start: &[u8], end: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(scan_range(&self.data, start, end))
    }
}
