//! # Argument Decoding
//!
//! Turns the ordered string arguments of each function into a typed request.
//! Argument counts are exact; every field error names the field.

use crate::domain::validators::{
    build_asset_terms, build_delivery_details, parse_float, parse_timestamp,
};
use crate::domain::value_objects::{AssetId, OrgId};
use crate::errors::SupplyChainError;
use crate::ports::inbound::{
    AddFuelOrderRequest, DeliverCrudeRequest, DeliverFuelRequest, DeliveryStop, RefineRequest,
    TransferRequest,
};

/// Fields per order in a `deliverFuel` call: orderId, estArrival, startLoc, dest.
pub const STOP_ARITY: usize = 4;

/// Decode a typed request from ordered string arguments.
pub trait FromArgs: Sized {
    fn from_args(args: &[String]) -> Result<Self, SupplyChainError>;
}

pub(crate) fn expect_args(args: &[String], expected: usize) -> Result<(), SupplyChainError> {
    if args.len() != expected {
        return Err(SupplyChainError::validation(format!(
            "Incorrect number of arguments. Expecting {}, got {}",
            expected,
            args.len()
        )));
    }
    Ok(())
}

fn require_text(raw: &str, field: &str) -> Result<String, SupplyChainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SupplyChainError::validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

impl FromArgs for DeliverCrudeRequest {
    fn from_args(args: &[String]) -> Result<Self, SupplyChainError> {
        expect_args(args, 9)?;
        Ok(Self {
            crude_id: AssetId::parse(&args[0])?,
            asset: build_asset_terms(&args[1], &args[2], &args[3])?,
            delivery: build_delivery_details(&args[4], &args[5], &args[6])?,
            vessel_id: require_text(&args[7], "vehicle id")?,
            timestamp: parse_timestamp(&args[8], "timestamp")?,
        })
    }
}

impl FromArgs for RefineRequest {
    fn from_args(args: &[String]) -> Result<Self, SupplyChainError> {
        expect_args(args, 8)?;
        Ok(Self {
            fuel_id: AssetId::parse(&args[0])?,
            asset: build_asset_terms(&args[1], &args[2], &args[3])?,
            density: parse_float(&args[4], "density")?,
            fuel_type: require_text(&args[5], "fuel type")?,
            crude_id: AssetId::parse(&args[6])?,
            timestamp: parse_timestamp(&args[7], "timestamp")?,
        })
    }
}

impl FromArgs for AddFuelOrderRequest {
    fn from_args(args: &[String]) -> Result<Self, SupplyChainError> {
        expect_args(args, 7)?;
        Ok(Self {
            order_id: AssetId::parse(&args[0])?,
            asset: build_asset_terms(&args[1], &args[2], &args[3])?,
            destination: OrgId::parse(&args[4], "destination")?,
            fuel_id: AssetId::parse(&args[5])?,
            timestamp: parse_timestamp(&args[6], "timestamp")?,
        })
    }
}

impl FromArgs for DeliverFuelRequest {
    fn from_args(args: &[String]) -> Result<Self, SupplyChainError> {
        if args.len() < 2 {
            return Err(SupplyChainError::validation(format!(
                "Incorrect number of arguments. Expecting a plan id, a vehicle id and at least one order, got {}",
                args.len()
            )));
        }

        let tuples = &args[2..];
        if tuples.is_empty() || tuples.len() % STOP_ARITY != 0 {
            return Err(SupplyChainError::validation(format!(
                "order arguments must come in groups of {} (orderId, estimatedArrival, startLocation, destination), got {}",
                STOP_ARITY,
                tuples.len()
            )));
        }

        let stops = tuples
            .chunks_exact(STOP_ARITY)
            .map(|chunk| {
                Ok(DeliveryStop {
                    order_id: AssetId::parse(&chunk[0])?,
                    delivery: build_delivery_details(&chunk[1], &chunk[2], &chunk[3])?,
                })
            })
            .collect::<Result<Vec<_>, SupplyChainError>>()?;

        Ok(Self {
            plan_id: AssetId::parse(&args[0])?,
            truck_id: require_text(&args[1], "vehicle id")?,
            stops,
        })
    }
}

impl FromArgs for TransferRequest {
    fn from_args(args: &[String]) -> Result<Self, SupplyChainError> {
        if args.len() != 3 && args.len() != 4 {
            return Err(SupplyChainError::validation(format!(
                "Incorrect number of arguments. Expecting 3 or 4, got {}",
                args.len()
            )));
        }

        Ok(Self {
            asset_id: AssetId::parse(&args[0])?,
            new_owner: OrgId::parse(&args[1], "new owner")?,
            timestamp: parse_timestamp(&args[2], "timestamp")?,
            plan_id: args
                .get(3)
                .map(|raw| AssetId::parse(raw))
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_deliver_crude_args() {
        let req = DeliverCrudeRequest::from_args(&args(&[
            "Crude1",
            "1000",
            "50",
            "org1",
            "2024-03-01T12:00:00Z",
            "org1",
            "org3",
            "Vessel1",
            "2024-03-01T08:00:00Z",
        ]))
        .unwrap();

        assert_eq!(req.crude_id.as_str(), "Crude1");
        assert_eq!(req.asset.quantity, 50);
        assert_eq!(req.delivery.destination.as_str(), "org3");
        assert_eq!(req.vessel_id, "Vessel1");
    }

    #[test]
    fn test_wrong_arity_is_validation() {
        let err = DeliverCrudeRequest::from_args(&args(&["Crude1"])).unwrap_err();
        assert!(matches!(err, SupplyChainError::Validation(_)));
        assert!(err.to_string().contains("Expecting 9"));

        let err = RefineRequest::from_args(&[]).unwrap_err();
        assert!(err.to_string().contains("Expecting 8"));
    }

    #[test]
    fn test_refine_rejects_bad_density_and_parent_id() {
        let mut raw = args(&[
            "Fuel1",
            "800",
            "45",
            "org3",
            "heavy",
            "diesel",
            "Crude1",
            "2024-03-01T12:00:00Z",
        ]);
        let err = RefineRequest::from_args(&raw).unwrap_err();
        assert!(err.to_string().contains("density"));

        raw[4] = "0.85".to_string();
        raw[6] = "Crude".to_string();
        let err = RefineRequest::from_args(&raw).unwrap_err();
        assert!(err.to_string().contains("<Kind><digits>"));

        raw[6] = "Crude1".to_string();
        let req = RefineRequest::from_args(&raw).unwrap();
        assert_eq!(req.density, 0.85);
        assert_eq!(req.crude_id.as_str(), "Crude1");
    }

    #[test]
    fn test_add_fuel_order_rejects_bad_destination() {
        let raw = args(&[
            "FuelOrder1",
            "200",
            "30",
            "org3",
            "station5",
            "Fuel1",
            "2024-03-01T12:00:00Z",
        ]);
        let err = AddFuelOrderRequest::from_args(&raw).unwrap_err();
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn test_deliver_fuel_tuples() {
        let req = DeliverFuelRequest::from_args(&args(&[
            "Plan1",
            "Truck1",
            "FuelOrder1",
            "2024-03-01T12:00:00Z",
            "org3",
            "org5",
            "FuelOrder2",
            "2024-03-01T13:00:00Z",
            "org3",
            "org6",
        ]))
        .unwrap();

        assert_eq!(req.stops.len(), 2);
        assert_eq!(req.stops[1].order_id.as_str(), "FuelOrder2");
        assert_eq!(req.stops[1].delivery.destination.as_str(), "org6");
    }

    #[test]
    fn test_deliver_fuel_partial_tuple_rejected() {
        for raw in [
            args(&["Plan1"]),
            args(&["Plan1", "Truck1"]),
            args(&["Plan1", "Truck1", "FuelOrder1", "2024-03-01T12:00:00Z", "org3"]),
        ] {
            let err = DeliverFuelRequest::from_args(&raw).unwrap_err();
            assert!(matches!(err, SupplyChainError::Validation(_)));
        }
    }

    #[test]
    fn test_transfer_optional_plan() {
        let crude =
            TransferRequest::from_args(&args(&["Crude1", "org3", "2024-03-01T12:00:00Z"])).unwrap();
        assert!(crude.plan_id.is_none());

        let order = TransferRequest::from_args(&args(&[
            "FuelOrder1",
            "org5",
            "2024-03-01T12:00:00Z",
            "Plan1",
        ]))
        .unwrap();
        assert_eq!(order.plan_id.map(|p| p.to_string()), Some("Plan1".to_string()));

        let err = TransferRequest::from_args(&args(&["Crude1", "org3"])).unwrap_err();
        assert!(err.to_string().contains("3 or 4"));
    }

    #[test]
    fn test_bad_timestamp_named() {
        let err =
            TransferRequest::from_args(&args(&["Crude1", "org3", "yesterday"])).unwrap_err();
        assert!(err.to_string().contains("timestamp"));
    }
}
