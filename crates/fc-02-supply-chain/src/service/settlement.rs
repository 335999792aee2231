//! Ownership transfer and balance settlement.
//!
//! The asset kind is resolved once from the id and matched exhaustively.
//! All reads and writes go through the staged ledger, so a payer who is
//! also a payee nets out correctly and nothing is visible until commit.

use super::ledger::Ledger;
use crate::domain::config::SupplyChainConfig;
use crate::domain::entities::{Crude, FuelDeliveryPlan, FuelOrder};
use crate::domain::settlement::{OrgRole, Payment, Settlement};
use crate::domain::value_objects::{AssetId, AssetKind, OrgId, Timestamp};
use crate::errors::SupplyChainError;
use crate::ports::inbound::{TransferReceipt, TransferRequest};
use fc_01_ledger_gateway::KeyValueStore;
use tracing::{info, warn};

pub(crate) fn transfer<KV: KeyValueStore + ?Sized>(
    ledger: &mut Ledger<'_, KV>,
    config: &SupplyChainConfig,
    req: TransferRequest,
) -> Result<TransferReceipt, SupplyChainError> {
    let TransferRequest {
        asset_id,
        new_owner,
        timestamp,
        plan_id,
    } = req;

    let (receipt, settlement) = match (asset_id.kind(), plan_id) {
        (AssetKind::Crude, None) => transfer_crude(ledger, config, &asset_id, new_owner, timestamp)?,
        (AssetKind::Crude, Some(plan_id)) => {
            return Err(SupplyChainError::validation(format!(
                "crude transfer of {} takes no plan id, got {}",
                asset_id, plan_id
            )))
        }
        (AssetKind::FuelOrder, Some(plan_id)) => {
            transfer_fuel_order(ledger, config, &asset_id, &plan_id, new_owner, timestamp)?
        }
        (AssetKind::FuelOrder, None) => {
            return Err(SupplyChainError::validation(format!(
                "transfer of {} requires the plan id it is delivered under",
                asset_id
            )))
        }
        (AssetKind::Fuel | AssetKind::Plan, _) => {
            return Err(SupplyChainError::validation(format!(
                "{} is not deliverable; only Crude and FuelOrder assets can be transferred",
                asset_id
            )))
        }
    };

    settle(ledger, &settlement)?;

    info!(
        asset_id = %receipt.asset_id,
        from = %receipt.previous_owner,
        to = %receipt.new_owner,
        delay_secs = receipt.delay_secs,
        penalty = receipt.penalty,
        "[fc-02] Asset transferred"
    );
    Ok(receipt)
}

fn transfer_crude<KV: KeyValueStore + ?Sized>(
    ledger: &mut Ledger<'_, KV>,
    config: &SupplyChainConfig,
    crude_id: &AssetId,
    new_owner: OrgId,
    timestamp: Timestamp,
) -> Result<(TransferReceipt, Settlement), SupplyChainError> {
    let key = crude_id.as_str();
    let mut crude: Crude = ledger.load(key, "Crude")?;

    let previous_owner =
        crude
            .asset_details
            .deliver_to(key, AssetKind::Crude, new_owner.clone())?;
    let delay_secs = crude.delivery_details.record_arrival(timestamp);
    let penalty = config.settlement.penalty(delay_secs);

    let settlement = Settlement {
        payer: new_owner.clone(),
        freight: Payment {
            payee: config.orgs.shipper.clone(),
            role: OrgRole::Shipper,
            amount: config
                .settlement
                .freight_fee(crude.asset_details.quantity, penalty),
        },
        supply: Payment {
            payee: config.orgs.driller.clone(),
            role: OrgRole::Driller,
            amount: crude.asset_details.value,
        },
    };

    ledger.write(key, &crude)?;

    let receipt = TransferReceipt {
        asset_id: key.to_string(),
        previous_owner,
        new_owner,
        delay_secs,
        penalty,
        payments: settlement.payments().into_iter().cloned().collect(),
    };
    Ok((receipt, settlement))
}

fn transfer_fuel_order<KV: KeyValueStore + ?Sized>(
    ledger: &mut Ledger<'_, KV>,
    config: &SupplyChainConfig,
    order_id: &AssetId,
    plan_id: &AssetId,
    new_owner: OrgId,
    timestamp: Timestamp,
) -> Result<(TransferReceipt, Settlement), SupplyChainError> {
    plan_id.expect_kind(AssetKind::Plan, "plan id")?;

    let key = order_id.as_str();
    let mut order: FuelOrder = ledger.load(key, "FuelOrder")?;
    // The order must be on its way before its plan is consulted.
    let previous_owner =
        order
            .asset_details
            .deliver_to(key, AssetKind::FuelOrder, new_owner.clone())?;

    let mut plan: FuelDeliveryPlan = ledger.load(plan_id.as_str(), "Plan")?;
    let delivery = plan.plan.get_mut(key).ok_or_else(|| {
        SupplyChainError::not_found(format!("order {} is not part of plan {}", key, plan_id))
    })?;

    let delay_secs = delivery.record_arrival(timestamp);
    let penalty = config.settlement.penalty(delay_secs);

    let settlement = Settlement {
        payer: new_owner.clone(),
        freight: Payment {
            payee: config.orgs.distributor.clone(),
            role: OrgRole::Distributor,
            amount: config
                .settlement
                .freight_fee(order.asset_details.quantity, penalty),
        },
        supply: Payment {
            payee: config.orgs.refiner.clone(),
            role: OrgRole::Refiner,
            amount: order.asset_details.value,
        },
    };

    ledger.write(plan_id.as_str(), &plan)?;
    ledger.write(key, &order)?;

    let receipt = TransferReceipt {
        asset_id: key.to_string(),
        previous_owner,
        new_owner,
        delay_secs,
        penalty,
        payments: settlement.payments().into_iter().cloned().collect(),
    };
    Ok((receipt, settlement))
}

/// Debit the payer by the total and credit each payee.
///
/// Every account must exist before anything is written.
pub(crate) fn settle<KV: KeyValueStore + ?Sized>(
    ledger: &mut Ledger<'_, KV>,
    settlement: &Settlement,
) -> Result<(), SupplyChainError> {
    ledger.balance(&settlement.payer)?;
    for payment in settlement.payments() {
        ledger.balance(&payment.payee)?;
    }
    settlement.validate()?;

    let total = settlement.total();
    let remaining = ledger.balance(&settlement.payer)? - total;
    ledger.set_balance(&settlement.payer, remaining)?;
    if remaining < 0.0 {
        warn!(
            payer = %settlement.payer,
            balance = remaining,
            "[fc-02] Payer overdrawn after settlement"
        );
    }

    for payment in settlement.payments() {
        let credited = ledger.balance(&payment.payee)? + payment.amount;
        ledger.set_balance(&payment.payee, credited)?;
        tracing::debug!(
            payee = %payment.payee,
            role = %payment.role,
            amount = payment.amount,
            "[fc-02] Payment credited"
        );
    }

    info!(payer = %settlement.payer, total, "[fc-02] Settlement applied");
    Ok(())
}
