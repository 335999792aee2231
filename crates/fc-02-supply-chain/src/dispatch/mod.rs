//! # Chaincode Dispatcher
//!
//! The string-in, bytes-out surface a host calls: a function name plus
//! ordered string arguments. Names resolve to `ChaincodeFunction`, arguments
//! decode into typed requests (`requests`), and the result is folded into a
//! binary `Response`.
//!
//! ## Modules
//!
//! - `requests`: `FromArgs` decoding for every mutating function

pub mod requests;

use crate::domain::value_objects::{AssetKind, OrgId};
use crate::errors::SupplyChainError;
use crate::ports::inbound::{
    AddFuelOrderRequest, DeliverCrudeRequest, DeliverFuelRequest, RefineRequest, SupplyChainApi,
    TransferReceipt, TransferRequest,
};
use requests::{expect_args, FromArgs};
use std::fmt;
use std::str::FromStr;

/// Every function a host may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChaincodeFunction {
    DeliverCrude,
    Refine,
    AddFuelOrder,
    DeliverFuel,
    Transfer,
    QueryAsset,
    QueryAssetByRange,
    QueryBalance,
    InitLedger,
}

impl ChaincodeFunction {
    pub const ALL: [ChaincodeFunction; 9] = [
        ChaincodeFunction::DeliverCrude,
        ChaincodeFunction::Refine,
        ChaincodeFunction::AddFuelOrder,
        ChaincodeFunction::DeliverFuel,
        ChaincodeFunction::Transfer,
        ChaincodeFunction::QueryAsset,
        ChaincodeFunction::QueryAssetByRange,
        ChaincodeFunction::QueryBalance,
        ChaincodeFunction::InitLedger,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ChaincodeFunction::DeliverCrude => "deliverCrude",
            ChaincodeFunction::Refine => "refine",
            ChaincodeFunction::AddFuelOrder => "addFuelOrder",
            ChaincodeFunction::DeliverFuel => "deliverFuel",
            ChaincodeFunction::Transfer => "transfer",
            ChaincodeFunction::QueryAsset => "queryAsset",
            ChaincodeFunction::QueryAssetByRange => "queryAssetByRange",
            ChaincodeFunction::QueryBalance => "queryBalance",
            ChaincodeFunction::InitLedger => "initLedger",
        }
    }
}

impl FromStr for ChaincodeFunction {
    type Err = SupplyChainError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == name)
            .ok_or_else(|| {
                SupplyChainError::validation(format!(
                    "Invalid Smart Contract function name '{}'",
                    name
                ))
            })
    }
}

impl fmt::Display for ChaincodeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary outcome returned to the host. Errors carry only a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(Vec<u8>),
    Error(String),
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Response::Success(bytes) => Some(bytes),
            Response::Error(_) => None,
        }
    }
}

/// What a successful invocation produced, before it is flattened to bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// Mutation committed; no payload.
    Committed,
    /// Mutation committed with a settlement receipt; no payload.
    Transferred(TransferReceipt),
    /// Query result bytes.
    Payload(Vec<u8>),
}

impl Invocation {
    pub fn into_payload(self) -> Vec<u8> {
        match self {
            Invocation::Committed | Invocation::Transferred(_) => Vec::new(),
            Invocation::Payload(bytes) => bytes,
        }
    }
}

/// Resolve, decode and execute one call. Errors are returned, not folded.
pub fn execute<A: SupplyChainApi + ?Sized>(
    api: &mut A,
    function: ChaincodeFunction,
    args: &[String],
) -> Result<Invocation, SupplyChainError> {
    match function {
        ChaincodeFunction::DeliverCrude => {
            api.deliver_crude(DeliverCrudeRequest::from_args(args)?)?;
            Ok(Invocation::Committed)
        }
        ChaincodeFunction::Refine => {
            api.refine(RefineRequest::from_args(args)?)?;
            Ok(Invocation::Committed)
        }
        ChaincodeFunction::AddFuelOrder => {
            api.add_fuel_order(AddFuelOrderRequest::from_args(args)?)?;
            Ok(Invocation::Committed)
        }
        ChaincodeFunction::DeliverFuel => {
            api.deliver_fuel(DeliverFuelRequest::from_args(args)?)?;
            Ok(Invocation::Committed)
        }
        ChaincodeFunction::Transfer => {
            let receipt = api.transfer(TransferRequest::from_args(args)?)?;
            Ok(Invocation::Transferred(receipt))
        }
        ChaincodeFunction::QueryAsset => {
            expect_args(args, 1)?;
            Ok(Invocation::Payload(api.query_asset(&args[0])?))
        }
        ChaincodeFunction::QueryAssetByRange => {
            expect_args(args, 1)?;
            let entries = api.query_asset_by_range(AssetKind::from_tag(&args[0])?)?;
            Ok(Invocation::Payload(serde_json::to_vec(&entries)?))
        }
        ChaincodeFunction::QueryBalance => {
            expect_args(args, 1)?;
            let balance = api.query_balance(&OrgId::parse(&args[0], "organization")?)?;
            Ok(Invocation::Payload(serde_json::to_vec(&balance)?))
        }
        ChaincodeFunction::InitLedger => {
            expect_args(args, 0)?;
            api.init_ledger()?;
            Ok(Invocation::Committed)
        }
    }
}

/// Host entry point: name and string arguments in, binary response out.
pub fn invoke<A: SupplyChainApi + ?Sized>(api: &mut A, function: &str, args: &[String]) -> Response {
    match try_invoke(api, function, args) {
        Ok(payload) => Response::Success(payload),
        Err(err) => Response::Error(err.to_string()),
    }
}

/// Like `invoke`, keeping the typed error.
pub fn try_invoke<A: SupplyChainApi + ?Sized>(
    api: &mut A,
    function: &str,
    args: &[String],
) -> Result<Vec<u8>, SupplyChainError> {
    let resolved: ChaincodeFunction = function.parse()?;
    let outcome = execute(api, resolved, args);

    match &outcome {
        Ok(_) => tracing::info!(function = %resolved, args = args.len(), "[fc-02] invoke ok"),
        Err(err) => tracing::warn!(
            function = %resolved,
            kind = err.kind().as_str(),
            error = %err,
            "[fc-02] invoke failed"
        ),
    }

    outcome.map(Invocation::into_payload)
}
