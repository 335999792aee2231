//! # Domain Entities
//!
//! The records persisted on the ledger. Field names are camelCase on the wire.
//!
//! | Record | Key | Created by | Mutated by |
//! |--------|-----|------------|------------|
//! | `Crude` | `Crude<N>` | crude intake | transfer |
//! | `Fuel` | `Fuel<N>` | refining | never |
//! | `FuelOrder` | `FuelOrder<N>` | order placement | plan construction, transfer |
//! | `FuelDeliveryPlan` | `Plan<N>` | plan construction | transfer (per-order delay) |
//!
//! Nothing is ever deleted.

use super::lifecycle::{self, LifecycleEvent};
use super::value_objects::{AssetKind, AssetState, OrgId, Proof, Timestamp, Vehicle};
use crate::errors::SupplyChainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value, quantity, owner and lifecycle state shared by every asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDetails {
    pub value: f64,
    pub quantity: u64,
    pub owner: OrgId,
    pub state: AssetState,
}

/// Caller-supplied part of `AssetDetails`. The creating operation picks the state.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetTerms {
    pub value: f64,
    pub quantity: u64,
    pub owner: OrgId,
}

impl AssetTerms {
    pub fn with_state(self, state: AssetState) -> AssetDetails {
        AssetDetails {
            value: self.value,
            quantity: self.quantity,
            owner: self.owner,
            state,
        }
    }
}

impl AssetDetails {
    /// Advance the state of an asset of `kind` by `event`.
    ///
    /// Fails with `StateError` and leaves the details untouched when the
    /// transition table has no entry.
    pub fn advance(
        &mut self,
        asset_id: &str,
        kind: AssetKind,
        event: LifecycleEvent,
    ) -> Result<AssetState, SupplyChainError> {
        let next = lifecycle::next_state(asset_id, kind, self.state, event)?;
        self.state = next;
        Ok(next)
    }

    /// Deliver the asset to `new_owner`. Returns the previous owner.
    pub fn deliver_to(
        &mut self,
        asset_id: &str,
        kind: AssetKind,
        new_owner: OrgId,
    ) -> Result<OrgId, SupplyChainError> {
        self.advance(asset_id, kind, LifecycleEvent::Deliver)?;
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}

/// Route and timing of one delivery leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub estimated_arrival: Timestamp,
    /// Seconds between estimated and actual arrival; negative when early.
    #[serde(default)]
    pub delay: f64,
    pub start_location: OrgId,
    pub destination: OrgId,
}

impl DeliveryDetails {
    /// Record the actual arrival time and return the delay in seconds.
    pub fn record_arrival(&mut self, arrived_at: Timestamp) -> f64 {
        let elapsed = arrived_at.signed_duration_since(self.estimated_arrival);
        self.delay = elapsed.num_seconds() as f64 + f64::from(elapsed.subsec_nanos()) / 1e9;
        self.delay
    }
}

/// Crude oil shipped by vessel from the driller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crude {
    pub asset_details: AssetDetails,
    pub delivery_details: DeliveryDetails,
    pub proof: Proof,
    pub vehicle: Vehicle,
    pub timestamp: Timestamp,
}

/// Refined product. `crude_id` is a back-reference, checked once on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fuel {
    pub asset_details: AssetDetails,
    pub density: f64,
    pub fuel_type: String,
    pub crude_id: String,
    pub timestamp: Timestamp,
}

/// A retailer's order against a refined fuel batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelOrder {
    pub asset_details: AssetDetails,
    pub destination: OrgId,
    pub proof: Proof,
    pub fuel_id: String,
    pub timestamp: Timestamp,
}

/// One truck's route covering several orders, keyed by order id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelDeliveryPlan {
    pub vehicle: Vehicle,
    pub plan: BTreeMap<String, DeliveryDetails>,
}
