//! # Validators
//!
//! Pure constructors that turn raw string arguments into domain values.
//! They run before anything touches the ledger.

use super::entities::{AssetTerms, DeliveryDetails};
use super::value_objects::{OrgId, Timestamp};
use crate::errors::SupplyChainError;
use chrono::DateTime;

/// Build asset terms from raw value, quantity and owner.
///
/// Value may be zero (a shipper may keep it private) but never negative.
/// The lifecycle state is attached by the creating operation.
pub fn build_asset_terms(
    value: &str,
    quantity: &str,
    owner: &str,
) -> Result<AssetTerms, SupplyChainError> {
    let value = parse_non_negative_float(value, "value")?;
    let quantity = quantity.trim().parse::<u64>().map_err(|_| {
        SupplyChainError::validation(format!(
            "quantity '{}' is not a non-negative integer",
            quantity
        ))
    })?;
    let owner = OrgId::parse(owner, "owner")?;

    Ok(AssetTerms {
        value,
        quantity,
        owner,
    })
}

/// Build delivery details with a zero delay.
pub fn build_delivery_details(
    estimated_arrival: &str,
    start_location: &str,
    destination: &str,
) -> Result<DeliveryDetails, SupplyChainError> {
    Ok(DeliveryDetails {
        estimated_arrival: parse_timestamp(estimated_arrival, "estimated arrival")?,
        delay: 0.0,
        start_location: OrgId::parse(start_location, "starting location")?,
        destination: OrgId::parse(destination, "destination")?,
    })
}

/// Parse an RFC 3339 timestamp.
pub fn parse_timestamp(raw: &str, field: &str) -> Result<Timestamp, SupplyChainError> {
    DateTime::parse_from_rfc3339(raw.trim()).map_err(|_| {
        SupplyChainError::validation(format!("{} '{}' is not in RFC 3339 format", field, raw))
    })
}

/// Parse a finite float, e.g. fuel density.
pub fn parse_float(raw: &str, field: &str) -> Result<f64, SupplyChainError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            SupplyChainError::validation(format!("{} '{}' is not a float number", field, raw))
        })
}

fn parse_non_negative_float(raw: &str, field: &str) -> Result<f64, SupplyChainError> {
    let v = parse_float(raw, field)?;
    if v < 0.0 {
        return Err(SupplyChainError::validation(format!(
            "{} '{}' must not be negative",
            field, raw
        )));
    }
    Ok(v)
}
