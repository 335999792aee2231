//! Asset creation and delivery-plan construction.

use super::ledger::Ledger;
use crate::domain::entities::{Crude, DeliveryDetails, Fuel, FuelDeliveryPlan, FuelOrder};
use crate::domain::lifecycle::LifecycleEvent;
use crate::domain::value_objects::{AssetKind, AssetState, Proof, Vehicle};
use crate::errors::SupplyChainError;
use crate::ports::inbound::{
    AddFuelOrderRequest, DeliverCrudeRequest, DeliverFuelRequest, RefineRequest,
};
use fc_01_ledger_gateway::KeyValueStore;
use std::collections::BTreeMap;
use tracing::info;

pub(crate) fn deliver_crude<KV: KeyValueStore + ?Sized>(
    ledger: &mut Ledger<'_, KV>,
    req: DeliverCrudeRequest,
) -> Result<(), SupplyChainError> {
    req.crude_id.expect_kind(AssetKind::Crude, "crude id")?;
    ledger.ensure_absent(req.crude_id.as_str(), "Crude")?;

    let crude = Crude {
        asset_details: req.asset.with_state(AssetState::OnWay),
        delivery_details: DeliveryDetails {
            delay: 0.0,
            ..req.delivery
        },
        proof: Proof::fixed(),
        vehicle: Vehicle::vessel(req.vessel_id),
        timestamp: req.timestamp,
    };
    ledger.write(req.crude_id.as_str(), &crude)?;

    info!(
        crude_id = %req.crude_id,
        owner = %crude.asset_details.owner,
        quantity = crude.asset_details.quantity,
        "[fc-02] Crude delivery registered"
    );
    Ok(())
}

pub(crate) fn refine<KV: KeyValueStore + ?Sized>(
    ledger: &mut Ledger<'_, KV>,
    req: RefineRequest,
) -> Result<(), SupplyChainError> {
    req.fuel_id.expect_kind(AssetKind::Fuel, "fuel id")?;
    req.crude_id.expect_kind(AssetKind::Crude, "crude id")?;
    if !req.density.is_finite() {
        return Err(SupplyChainError::validation(format!(
            "density '{}' is not a float number",
            req.density
        )));
    }

    ledger.ensure_present(req.crude_id.as_str(), "Crude")?;
    ledger.ensure_absent(req.fuel_id.as_str(), "Fuel")?;

    let fuel = Fuel {
        asset_details: req.asset.with_state(AssetState::Refined),
        density: req.density,
        fuel_type: req.fuel_type,
        crude_id: req.crude_id.as_str().to_string(),
        timestamp: req.timestamp,
    };
    ledger.write(req.fuel_id.as_str(), &fuel)?;

    info!(
        fuel_id = %req.fuel_id,
        crude_id = %req.crude_id,
        fuel_type = %fuel.fuel_type,
        "[fc-02] Fuel refined"
    );
    Ok(())
}

pub(crate) fn add_fuel_order<KV: KeyValueStore + ?Sized>(
    ledger: &mut Ledger<'_, KV>,
    req: AddFuelOrderRequest,
) -> Result<(), SupplyChainError> {
    req.order_id.expect_kind(AssetKind::FuelOrder, "order id")?;
    req.fuel_id.expect_kind(AssetKind::Fuel, "fuel id")?;

    ledger.ensure_present(req.fuel_id.as_str(), "Fuel")?;
    ledger.ensure_absent(req.order_id.as_str(), "FuelOrder")?;

    let order = FuelOrder {
        asset_details: req.asset.with_state(AssetState::ReadyForDistribution),
        destination: req.destination,
        proof: Proof::fixed(),
        fuel_id: req.fuel_id.as_str().to_string(),
        timestamp: req.timestamp,
    };
    ledger.write(req.order_id.as_str(), &order)?;

    info!(
        order_id = %req.order_id,
        fuel_id = %req.fuel_id,
        destination = %order.destination,
        "[fc-02] Fuel order placed"
    );
    Ok(())
}

pub(crate) fn deliver_fuel<KV: KeyValueStore + ?Sized>(
    ledger: &mut Ledger<'_, KV>,
    req: DeliverFuelRequest,
) -> Result<(), SupplyChainError> {
    req.plan_id.expect_kind(AssetKind::Plan, "plan id")?;
    if req.stops.is_empty() {
        return Err(SupplyChainError::validation(
            "a delivery plan needs at least one order",
        ));
    }
    for stop in &req.stops {
        stop.order_id.expect_kind(AssetKind::FuelOrder, "order id")?;
    }
    ledger.ensure_absent(req.plan_id.as_str(), "Plan")?;

    let mut plan = BTreeMap::new();
    for stop in req.stops {
        let key = stop.order_id.as_str().to_string();
        if plan.contains_key(&key) {
            return Err(SupplyChainError::validation(format!(
                "order {} appears more than once in plan {}",
                key, req.plan_id
            )));
        }

        let mut order: FuelOrder = ledger.load(&key, "FuelOrder")?;
        order
            .asset_details
            .advance(&key, AssetKind::FuelOrder, LifecycleEvent::Dispatch)?;
        ledger.write(&key, &order)?;

        plan.insert(
            key,
            DeliveryDetails {
                delay: 0.0,
                ..stop.delivery
            },
        );
    }

    let orders = plan.len();
    let record = FuelDeliveryPlan {
        vehicle: Vehicle::truck(req.truck_id),
        plan,
    };
    ledger.write(req.plan_id.as_str(), &record)?;

    info!(
        plan_id = %req.plan_id,
        truck = %record.vehicle.id,
        orders,
        "[fc-02] Delivery plan created"
    );
    Ok(())
}
