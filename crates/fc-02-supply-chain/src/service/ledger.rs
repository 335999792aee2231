//! Typed JSON access over a staged `LedgerTransaction`.

use crate::domain::value_objects::OrgId;
use crate::errors::SupplyChainError;
use fc_01_ledger_gateway::{KeyValueStore, LedgerTransaction};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) struct Ledger<'a, KV: KeyValueStore + ?Sized> {
    tx: LedgerTransaction<'a, KV>,
}

impl<'a, KV: KeyValueStore + ?Sized> Ledger<'a, KV> {
    pub(crate) fn begin(store: &'a mut KV) -> Self {
        Self {
            tx: LedgerTransaction::begin(store),
        }
    }

    pub(crate) fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SupplyChainError> {
        match self.tx.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Read a record that must exist; `what` names it in the error.
    pub(crate) fn load<T: DeserializeOwned>(&self, key: &str, what: &str) -> Result<T, SupplyChainError> {
        self.read(key)?
            .ok_or_else(|| SupplyChainError::not_found(format!("{} {} does not exist", what, key)))
    }

    pub(crate) fn write<T: Serialize>(&mut self, key: &str, record: &T) -> Result<(), SupplyChainError> {
        let bytes = serde_json::to_vec(record)?;
        self.tx.put(key.as_bytes(), &bytes);
        Ok(())
    }

    pub(crate) fn exists(&self, key: &str) -> Result<bool, SupplyChainError> {
        Ok(self.tx.exists(key.as_bytes())?)
    }

    pub(crate) fn ensure_absent(&self, key: &str, what: &str) -> Result<(), SupplyChainError> {
        if self.exists(key)? {
            return Err(SupplyChainError::conflict(format!("{} {} already exists", what, key)));
        }
        Ok(())
    }

    pub(crate) fn ensure_present(&self, key: &str, what: &str) -> Result<(), SupplyChainError> {
        if !self.exists(key)? {
            return Err(SupplyChainError::not_found(format!("{} {} does not exist", what, key)));
        }
        Ok(())
    }

    pub(crate) fn balance(&self, org: &OrgId) -> Result<f64, SupplyChainError> {
        self.read(org.as_str())?.ok_or_else(|| {
            SupplyChainError::not_found(format!(
                "account {} is not initialized; call initLedger first",
                org
            ))
        })
    }

    /// Stage a new balance. JSON has no infinity, so a balance that left the
    /// finite range is refused instead of being stored as `null`.
    pub(crate) fn set_balance(&mut self, org: &OrgId, amount: f64) -> Result<(), SupplyChainError> {
        if !amount.is_finite() {
            return Err(SupplyChainError::Payment(format!(
                "balance of account {} would become {}",
                org, amount
            )));
        }
        self.write(org.as_str(), &amount)
    }

    pub(crate) fn commit(self) -> Result<usize, SupplyChainError> {
        Ok(self.tx.commit()?)
    }

    pub(crate) fn rollback(self) -> usize {
        self.tx.rollback()
    }
}
