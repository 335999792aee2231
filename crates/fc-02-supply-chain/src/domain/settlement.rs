//! # Settlement Policy
//!
//! Delay penalties and the two payments a new owner owes on transfer.
//!
//! ```text
//! penalty = max(0, delay_secs / penalty_divisor)
//! freight = max(0, quantity / freight_divisor - penalty)   → carrier
//! supply  = asset value                                    → supplier
//! payer   = new owner, debited freight + supply
//! ```
//!
//! The payer's balance has no floor: overdraft is allowed and only logged.

use super::value_objects::OrgId;
use crate::errors::SupplyChainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric policy for penalties and freight fees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettlementPolicy {
    /// Seconds of delay per unit of penalty (default: 100).
    pub penalty_divisor: f64,
    /// Units of quantity per unit of freight fee (default: 10).
    pub freight_divisor: f64,
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        Self {
            penalty_divisor: 100.0,
            freight_divisor: 10.0,
        }
    }
}

impl SettlementPolicy {
    /// Penalty for `delay_secs`; early arrival costs nothing.
    #[must_use]
    pub fn penalty(&self, delay_secs: f64) -> f64 {
        (delay_secs / self.penalty_divisor).max(0.0)
    }

    /// Carrier fee for `quantity` after deducting `penalty`, never below zero.
    #[must_use]
    pub fn freight_fee(&self, quantity: u64, penalty: f64) -> f64 {
        (quantity as f64 / self.freight_divisor - penalty).max(0.0)
    }
}

/// Participant roles in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    Driller,
    Shipper,
    Refiner,
    Distributor,
    Retailer,
}

impl OrgRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgRole::Driller => "driller",
            OrgRole::Shipper => "shipper",
            OrgRole::Refiner => "refiner",
            OrgRole::Distributor => "distributor",
            OrgRole::Retailer => "retailer",
        }
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One amount owed to one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payee: OrgId,
    pub role: OrgRole,
    pub amount: f64,
}

/// Carrier fee plus supplier payment owed by `payer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub payer: OrgId,
    pub freight: Payment,
    pub supply: Payment,
}

impl Settlement {
    pub fn payments(&self) -> [&Payment; 2] {
        [&self.freight, &self.supply]
    }

    /// Amount debited from the payer.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.freight.amount + self.supply.amount
    }

    /// Reject negative or non-finite amounts.
    pub fn validate(&self) -> Result<(), SupplyChainError> {
        for payment in self.payments() {
            if !payment.amount.is_finite() || payment.amount < 0.0 {
                return Err(SupplyChainError::Payment(format!(
                    "amount {} owed to {} ({}) must be a non-negative number",
                    payment.amount, payment.payee, payment.role
                )));
            }
        }
        Ok(())
    }
}
