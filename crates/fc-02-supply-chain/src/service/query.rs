//! Read-only lookups straight against the store.

use crate::domain::value_objects::{AssetKind, OrgId};
use crate::errors::SupplyChainError;
use crate::ports::inbound::RangeEntry;
use fc_01_ledger_gateway::KeyValueStore;

pub(crate) fn query_asset<KV: KeyValueStore + ?Sized>(
    store: &KV,
    key: &str,
) -> Result<Vec<u8>, SupplyChainError> {
    if key.trim().is_empty() {
        return Err(SupplyChainError::validation("asset key must not be empty"));
    }

    store
        .get(key.as_bytes())?
        .ok_or_else(|| SupplyChainError::not_found(format!("Could not locate asset {}", key)))
}

pub(crate) fn query_asset_by_range<KV: KeyValueStore + ?Sized>(
    store: &KV,
    kind: AssetKind,
) -> Result<Vec<RangeEntry>, SupplyChainError> {
    let (start, end) = kind.range_bounds();

    let entries = store
        .range_scan(start.as_bytes(), end.as_bytes())?
        .into_iter()
        .map(|(key, value)| {
            Ok(RangeEntry {
                key: String::from_utf8_lossy(&key).into_owned(),
                record: serde_json::from_slice(&value)?,
            })
        })
        .collect::<Result<Vec<_>, SupplyChainError>>()?;

    tracing::debug!(kind = %kind, count = entries.len(), "[fc-02] Range query");
    Ok(entries)
}

pub(crate) fn query_balance<KV: KeyValueStore + ?Sized>(
    store: &KV,
    org: &OrgId,
) -> Result<f64, SupplyChainError> {
    match store.get(org.as_str().as_bytes())? {
        Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
        None => Err(SupplyChainError::not_found(format!(
            "account {} is not initialized; call initLedger first",
            org
        ))),
    }
}
