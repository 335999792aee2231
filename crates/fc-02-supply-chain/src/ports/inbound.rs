//! # Inbound Ports (Driving Ports)
//!
//! The operations the chaincode exposes, each with a typed request. Requests
//! hold parsed domain values; building one from raw strings is the
//! dispatcher's job (`dispatch::requests`). The service checks that each id
//! is of the kind its role needs and assigns the creation state.

use crate::domain::entities::{AssetTerms, DeliveryDetails};
use crate::domain::settlement::Payment;
use crate::domain::value_objects::{AssetId, AssetKind, OrgId, Timestamp};
use crate::errors::SupplyChainError;
use serde::Serialize;

/// Crude intake: a vessel leaves the driller.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliverCrudeRequest {
    pub crude_id: AssetId,
    /// Created `ON_WAY`.
    pub asset: AssetTerms,
    pub delivery: DeliveryDetails,
    pub vessel_id: String,
    pub timestamp: Timestamp,
}

/// Refining: a fuel batch derived from an existing crude.
#[derive(Debug, Clone, PartialEq)]
pub struct RefineRequest {
    pub fuel_id: AssetId,
    /// Created `REFINED`.
    pub asset: AssetTerms,
    pub density: f64,
    pub fuel_type: String,
    pub crude_id: AssetId,
    pub timestamp: Timestamp,
}

/// Order placement against an existing fuel batch.
#[derive(Debug, Clone, PartialEq)]
pub struct AddFuelOrderRequest {
    pub order_id: AssetId,
    /// Created `READY_FOR_DISTRIBUTION`.
    pub asset: AssetTerms,
    pub destination: OrgId,
    pub fuel_id: AssetId,
    pub timestamp: Timestamp,
}

/// One order covered by a delivery plan.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryStop {
    pub order_id: AssetId,
    pub delivery: DeliveryDetails,
}

/// Delivery-plan construction for one truck.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliverFuelRequest {
    pub plan_id: AssetId,
    pub truck_id: String,
    pub stops: Vec<DeliveryStop>,
}

/// Ownership transfer of a `Crude` or `FuelOrder`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub asset_id: AssetId,
    pub new_owner: OrgId,
    pub timestamp: Timestamp,
    /// Required for `FuelOrder`, rejected for `Crude`.
    pub plan_id: Option<AssetId>,
}

/// What a committed transfer did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    pub asset_id: String,
    pub previous_owner: OrgId,
    pub new_owner: OrgId,
    pub delay_secs: f64,
    pub penalty: f64,
    pub payments: Vec<Payment>,
}

/// One row of a range query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeEntry {
    pub key: String,
    pub record: serde_json::Value,
}

/// Primary API of the supply-chain chaincode.
///
/// Every mutating call is all-or-nothing: on `Err` the ledger is unchanged.
pub trait SupplyChainApi {
    /// Create a `Crude` in `ON_WAY`.
    ///
    /// ## Errors
    ///
    /// - `Conflict`: id already exists
    fn deliver_crude(&mut self, req: DeliverCrudeRequest) -> Result<(), SupplyChainError>;

    /// Create a `Fuel` in `REFINED` referencing an existing crude.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: parent crude absent
    /// - `Conflict`: fuel id already exists
    fn refine(&mut self, req: RefineRequest) -> Result<(), SupplyChainError>;

    /// Create a `FuelOrder` in `READY_FOR_DISTRIBUTION` referencing an existing fuel.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: parent fuel absent
    /// - `Conflict`: order id already exists
    fn add_fuel_order(&mut self, req: AddFuelOrderRequest) -> Result<(), SupplyChainError>;

    /// Create a `FuelDeliveryPlan` and move every covered order to `ON_WAY`.
    ///
    /// ## Errors
    ///
    /// - `Validation`: no stops, or an order listed twice
    /// - `Conflict`: plan id already exists
    /// - `NotFound`: an order is absent
    /// - `State`: an order is not `READY_FOR_DISTRIBUTION`
    fn deliver_fuel(&mut self, req: DeliverFuelRequest) -> Result<(), SupplyChainError>;

    /// Deliver an asset to a new owner, record the delay and settle payments.
    ///
    /// ## Errors
    ///
    /// - `Validation`: asset kind not deliverable, plan id missing or unexpected
    /// - `NotFound`: asset, plan, plan entry or account absent
    /// - `State`: asset is not `ON_WAY`
    /// - `Payment`: negative payment amount
    fn transfer(&mut self, req: TransferRequest) -> Result<TransferReceipt, SupplyChainError>;

    /// Create all organization accounts with the starting balance. Once per ledger.
    ///
    /// ## Errors
    ///
    /// - `Conflict`: already initialized
    fn init_ledger(&mut self) -> Result<(), SupplyChainError>;

    /// Raw stored bytes under `key`.
    fn query_asset(&self, key: &str) -> Result<Vec<u8>, SupplyChainError>;

    /// All records of `kind` in `[<kind>0, <kind>999)`, ordered by key.
    fn query_asset_by_range(&self, kind: AssetKind) -> Result<Vec<RangeEntry>, SupplyChainError>;

    /// Current balance of an organization account.
    fn query_balance(&self, org: &OrgId) -> Result<f64, SupplyChainError>;
}
