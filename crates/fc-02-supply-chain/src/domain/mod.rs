//! # Domain Layer
//!
//! Pure supply-chain logic: no I/O, no ledger access.
//!
//! - `value_objects` - identifiers, states, proof and vehicle
//! - `entities` - persisted records
//! - `validators` - raw argument → domain value constructors
//! - `lifecycle` - state transition table
//! - `settlement` - penalty and payment policy
//! - `config` - organization directory and chaincode configuration

pub mod config;
pub mod entities;
pub mod lifecycle;
pub mod settlement;
pub mod validators;
pub mod value_objects;

pub use config::{ConfigError, OrgDirectory, SupplyChainConfig};
pub use entities::{AssetDetails, AssetTerms, Crude, DeliveryDetails, Fuel, FuelDeliveryPlan, FuelOrder};
pub use lifecycle::LifecycleEvent;
pub use settlement::{OrgRole, Payment, Settlement, SettlementPolicy};
pub use value_objects::{AssetId, AssetKind, AssetState, OrgId, Proof, Timestamp, Vehicle};
