//! # Chaincode Configuration
//!
//! Which organization plays which role, what every account starts with, and
//! the settlement policy. Defaults reproduce the six-organization network:
//!
//! | Org | Role |
//! |-----|------|
//! | org1 | driller |
//! | org2 | shipper |
//! | org3 | refiner |
//! | org4 | distributor |
//! | org5, org6 | retailers / fuel stations |

use super::settlement::{OrgRole, SettlementPolicy};
use super::value_objects::OrgId;
use std::collections::HashSet;
use thiserror::Error;

/// Default starting balance of every account.
pub const DEFAULT_INITIAL_BALANCE: f64 = 100_000.0;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("initial balance must be a finite non-negative number, got {0}")]
    InvalidInitialBalance(f64),

    #[error("{name} must be a positive number, got {value}")]
    InvalidDivisor { name: &'static str, value: f64 },

    #[error("organization {0} is assigned more than one role")]
    DuplicateOrganization(OrgId),

    #[error("at least one retailer organization is required")]
    NoRetailers,
}

/// Role → organization assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct OrgDirectory {
    pub driller: OrgId,
    pub shipper: OrgId,
    pub refiner: OrgId,
    pub distributor: OrgId,
    pub retailers: Vec<OrgId>,
}

impl Default for OrgDirectory {
    fn default() -> Self {
        Self {
            driller: OrgId::known("org1"),
            shipper: OrgId::known("org2"),
            refiner: OrgId::known("org3"),
            distributor: OrgId::known("org4"),
            retailers: vec![OrgId::known("org5"), OrgId::known("org6")],
        }
    }
}

impl OrgDirectory {
    /// Every organization with its role, in bootstrap order.
    pub fn all(&self) -> Vec<(OrgRole, &OrgId)> {
        let mut orgs = vec![
            (OrgRole::Driller, &self.driller),
            (OrgRole::Shipper, &self.shipper),
            (OrgRole::Refiner, &self.refiner),
            (OrgRole::Distributor, &self.distributor),
        ];
        orgs.extend(self.retailers.iter().map(|org| (OrgRole::Retailer, org)));
        orgs
    }
}

/// Complete chaincode configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyChainConfig {
    pub orgs: OrgDirectory,
    pub initial_balance: f64,
    pub settlement: SettlementPolicy,
}

impl Default for SupplyChainConfig {
    fn default() -> Self {
        Self {
            orgs: OrgDirectory::default(),
            initial_balance: DEFAULT_INITIAL_BALANCE,
            settlement: SettlementPolicy::default(),
        }
    }
}

impl SupplyChainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_balance.is_finite() || self.initial_balance < 0.0 {
            return Err(ConfigError::InvalidInitialBalance(self.initial_balance));
        }

        for (name, value) in [
            ("penalty_divisor", self.settlement.penalty_divisor),
            ("freight_divisor", self.settlement.freight_divisor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDivisor { name, value });
            }
        }

        if self.orgs.retailers.is_empty() {
            return Err(ConfigError::NoRetailers);
        }

        let mut seen = HashSet::new();
        for (_, org) in self.orgs.all() {
            if !seen.insert(org) {
                return Err(ConfigError::DuplicateOrganization(org.clone()));
            }
        }

        Ok(())
    }
}
