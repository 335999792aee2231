//! # Supply Chain Service
//!
//! Implements `SupplyChainApi` over any `KeyValueStore`.
//!
//! ## Execution model
//!
//! Every mutating operation runs against a fresh `Ledger` (a staged
//! `LedgerTransaction`). The operation body only stages writes; the service
//! commits them in one atomic batch when the body returns `Ok`, and discards
//! them otherwise. A failure on the Nth order of a plan therefore leaves the
//! first N-1 orders untouched.
//!
//! ## Submodules
//!
//! - `lifecycle` - crude intake, refining, order placement, plan construction
//! - `settlement` - transfer and balance settlement
//! - `query` - point lookup and range scan
//! - `bootstrap` - one-time account creation

mod bootstrap;
mod ledger;
mod lifecycle;
mod query;
mod settlement;

use crate::domain::config::SupplyChainConfig;
use crate::domain::value_objects::{AssetKind, OrgId};
use crate::errors::SupplyChainError;
use crate::ports::inbound::{
    AddFuelOrderRequest, DeliverCrudeRequest, DeliverFuelRequest, RangeEntry, RefineRequest,
    SupplyChainApi, TransferReceipt, TransferRequest,
};
use fc_01_ledger_gateway::{InMemoryKVStore, KeyValueStore};
use ledger::Ledger;

/// The supply-chain chaincode bound to a ledger store.
pub struct SupplyChainService<KV: KeyValueStore> {
    /// Ledger key space.
    pub(crate) store: KV,
    /// Organization roles, starting balance, settlement policy.
    pub(crate) config: SupplyChainConfig,
}

impl SupplyChainService<InMemoryKVStore> {
    /// Service over an empty in-memory ledger.
    pub fn new_in_memory(config: SupplyChainConfig) -> Self {
        Self::new(InMemoryKVStore::new(), config)
    }
}

impl<KV: KeyValueStore> SupplyChainService<KV> {
    pub fn new(store: KV, config: SupplyChainConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SupplyChainConfig {
        &self.config
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &KV {
        &self.store
    }

    /// Run `body` against a staged ledger; commit on `Ok`, discard on `Err`.
    fn execute<T>(
        &mut self,
        operation: &'static str,
        body: impl FnOnce(&mut Ledger<'_, KV>, &SupplyChainConfig) -> Result<T, SupplyChainError>,
    ) -> Result<T, SupplyChainError> {
        let mut ledger = Ledger::begin(&mut self.store);

        match body(&mut ledger, &self.config) {
            Ok(value) => {
                let written = ledger.commit()?;
                tracing::debug!(operation, written, "[fc-02] committed");
                Ok(value)
            }
            Err(err) => {
                let discarded = ledger.rollback();
                tracing::warn!(operation, discarded, error = %err, "[fc-02] rejected");
                Err(err)
            }
        }
    }
}

impl<KV: KeyValueStore> SupplyChainApi for SupplyChainService<KV> {
    fn deliver_crude(&mut self, req: DeliverCrudeRequest) -> Result<(), SupplyChainError> {
        self.execute("deliverCrude", |ledger, _| lifecycle::deliver_crude(ledger, req))
    }

    fn refine(&mut self, req: RefineRequest) -> Result<(), SupplyChainError> {
        self.execute("refine", |ledger, _| lifecycle::refine(ledger, req))
    }

    fn add_fuel_order(&mut self, req: AddFuelOrderRequest) -> Result<(), SupplyChainError> {
        self.execute("addFuelOrder", |ledger, _| lifecycle::add_fuel_order(ledger, req))
    }

    fn deliver_fuel(&mut self, req: DeliverFuelRequest) -> Result<(), SupplyChainError> {
        self.execute("deliverFuel", |ledger, _| lifecycle::deliver_fuel(ledger, req))
    }

    fn transfer(&mut self, req: TransferRequest) -> Result<TransferReceipt, SupplyChainError> {
        self.execute("transfer", |ledger, config| {
            settlement::transfer(ledger, config, req)
        })
    }

    fn init_ledger(&mut self) -> Result<(), SupplyChainError> {
        self.execute("initLedger", |ledger, config| {
            bootstrap::init_ledger(ledger, config)
        })
    }

    fn query_asset(&self, key: &str) -> Result<Vec<u8>, SupplyChainError> {
        query::query_asset(&self.store, key)
    }

    fn query_asset_by_range(&self, kind: AssetKind) -> Result<Vec<RangeEntry>, SupplyChainError> {
        query::query_asset_by_range(&self.store, kind)
    }

    fn query_balance(&self, org: &OrgId) -> Result<f64, SupplyChainError> {
        query::query_balance(&self.store, org)
    }
}
