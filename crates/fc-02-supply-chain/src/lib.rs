//! # Fuel Supply Chain (fc-02)
//!
//! Asset lifecycle state machine and settlement engine for a fuel supply
//! chain shared by six organizations: a driller, a shipper, a refiner, a
//! distributor and two retailers.
//!
//! ## Asset Flow
//!
//! ```text
//! deliverCrude ──→ Crude (ON_WAY) ──transfer──→ DELIVERED
//!                    │
//!                  refine
//!                    ↓
//!                  Fuel (REFINED) ──addFuelOrder──→ FuelOrder (READY_FOR_DISTRIBUTION)
//!                                                     │
//!                                          deliverFuel (Plan)
//!                                                     ↓
//!                                                   ON_WAY ──transfer──→ DELIVERED
//! ```
//!
//! Every transfer settles two payments owed by the new owner: a freight fee
//! reduced by the delay penalty, and the asset value.
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Forward-only state | Only the three lifecycle transitions exist |
//! | Parent existence | Fuel needs its Crude, FuelOrder its Fuel |
//! | Unique identity | Creation never overwrites an existing key |
//! | Atomic invocation | Writes are staged and committed together or not at all |
//! | Single bootstrap | `initLedger` succeeds at most once per ledger |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure domain logic (entities, value objects, lifecycle, settlement)
//! - `ports/` - Inbound API and typed requests
//! - `service/` - Application service implementing the API over a `KeyValueStore`
//! - `dispatch/` - Function-name and string-argument surface for hosts
//!
//! ## Usage
//!
//! ```ignore
//! use fc_02_supply_chain::{dispatch, SupplyChainConfig, SupplyChainService};
//!
//! let mut service = SupplyChainService::new_in_memory(SupplyChainConfig::default());
//! dispatch::invoke(&mut service, "initLedger", &[]);
//! let response = dispatch::invoke(&mut service, "queryBalance", &["org1".to_string()]);
//! ```

pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use dispatch::{invoke, try_invoke, ChaincodeFunction, Invocation, Response};
pub use domain::config::{ConfigError, OrgDirectory, SupplyChainConfig, DEFAULT_INITIAL_BALANCE};
pub use domain::entities::{AssetDetails, AssetTerms, Crude, DeliveryDetails, Fuel, FuelDeliveryPlan, FuelOrder};
pub use domain::settlement::{OrgRole, Payment, Settlement, SettlementPolicy};
pub use domain::value_objects::{AssetId, AssetKind, AssetState, OrgId, Proof, Timestamp, Vehicle};
pub use errors::{ErrorKind, SupplyChainError};
pub use ports::inbound::{SupplyChainApi, TransferReceipt};
pub use service::SupplyChainService;
