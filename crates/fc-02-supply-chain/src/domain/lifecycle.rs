//! # Asset Lifecycle
//!
//! The complete transition table. States only move forward:
//!
//! ```text
//! Crude:      ON_WAY ──Deliver──→ DELIVERED
//! FuelOrder:  READY_FOR_DISTRIBUTION ──Dispatch──→ ON_WAY ──Deliver──→ DELIVERED
//! Fuel:       REFINED (terminal)
//! ```
//!
//! `Dispatch` is raised by delivery-plan construction, `Deliver` by transfer.

use super::value_objects::{AssetKind, AssetState};
use crate::errors::SupplyChainError;
use std::fmt;

/// Something that happens to an asset after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Assigned to a delivery plan.
    Dispatch,
    /// Ownership transferred on arrival.
    Deliver,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleEvent::Dispatch => f.write_str("dispatch"),
            LifecycleEvent::Deliver => f.write_str("transfer"),
        }
    }
}

/// State `event` requires, if `kind` accepts it at all.
pub const fn required_state(kind: AssetKind, event: LifecycleEvent) -> Option<AssetState> {
    match (kind, event) {
        (AssetKind::Crude, LifecycleEvent::Deliver) => Some(AssetState::OnWay),
        (AssetKind::FuelOrder, LifecycleEvent::Dispatch) => Some(AssetState::ReadyForDistribution),
        (AssetKind::FuelOrder, LifecycleEvent::Deliver) => Some(AssetState::OnWay),
        (AssetKind::Crude, LifecycleEvent::Dispatch)
        | (AssetKind::Fuel, _)
        | (AssetKind::Plan, _) => None,
    }
}

/// Look up the transition for `(kind, from, event)`.
pub fn next_state(
    asset_id: &str,
    kind: AssetKind,
    from: AssetState,
    event: LifecycleEvent,
) -> Result<AssetState, SupplyChainError> {
    use AssetState::*;

    match (kind, from, event) {
        (AssetKind::Crude, OnWay, LifecycleEvent::Deliver) => Ok(Delivered),
        (AssetKind::FuelOrder, ReadyForDistribution, LifecycleEvent::Dispatch) => Ok(OnWay),
        (AssetKind::FuelOrder, OnWay, LifecycleEvent::Deliver) => Ok(Delivered),
        _ => Err(match required_state(kind, event) {
            Some(required) => SupplyChainError::State(format!(
                "cannot {} {} while it is {}; it must be {}",
                event, asset_id, from, required
            )),
            None => SupplyChainError::State(format!(
                "{} assets do not support {}",
                kind, event
            )),
        }),
    }
}
