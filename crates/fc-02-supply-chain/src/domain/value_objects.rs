//! # Value Objects
//!
//! Identifiers, lifecycle states and the fixed attestation stub. Everything
//! here is validated on construction, so a value that exists is well-formed.

use crate::errors::SupplyChainError;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// RFC 3339 timestamp with the caller's offset preserved.
pub type Timestamp = DateTime<FixedOffset>;

/// Prefix every organization identifier carries.
pub const ORG_PREFIX: &str = "org";

// =============================================================================
// ORGANIZATION ID
// =============================================================================

/// Organization identifier (`org<N>`), also the key of its balance account.
///
/// The id is taken from the request as-is; it is never checked against the
/// identity of whoever submitted the invocation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrgId(String);

impl OrgId {
    /// Parse `raw`, naming `field` in the error when the prefix is missing.
    pub fn parse(raw: &str, field: &str) -> Result<Self, SupplyChainError> {
        if raw.len() > ORG_PREFIX.len() && raw.starts_with(ORG_PREFIX) {
            Ok(Self(raw.to_string()))
        } else {
            Err(SupplyChainError::validation(format!(
                "{} '{}' is not prefixed with '{}'",
                field, raw, ORG_PREFIX
            )))
        }
    }

    pub(crate) fn known(raw: &str) -> Self {
        debug_assert!(raw.starts_with(ORG_PREFIX));
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrgId {
    type Error = SupplyChainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        OrgId::parse(&raw, "organization id")
    }
}

impl From<OrgId> for String {
    fn from(org: OrgId) -> Self {
        org.0
    }
}

impl fmt::Debug for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrgId({})", self.0)
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// ASSET KIND / ASSET ID
// =============================================================================

/// The four record families stored under `<Kind><digits>` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Crude,
    Fuel,
    FuelOrder,
    Plan,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Crude,
        AssetKind::Fuel,
        AssetKind::FuelOrder,
        AssetKind::Plan,
    ];

    /// Key prefix for this kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            AssetKind::Crude => "Crude",
            AssetKind::Fuel => "Fuel",
            AssetKind::FuelOrder => "FuelOrder",
            AssetKind::Plan => "Plan",
        }
    }

    /// Parse an exact kind tag as used by range queries.
    pub fn from_tag(tag: &str) -> Result<Self, SupplyChainError> {
        AssetKind::ALL
            .into_iter()
            .find(|kind| kind.prefix() == tag)
            .ok_or_else(|| {
                SupplyChainError::validation(format!(
                    "kind '{}' should be one of {{Crude,Fuel,FuelOrder,Plan}}",
                    tag
                ))
            })
    }

    /// Lexicographic key range `[<kind>0, <kind>999)` scanned by range queries.
    ///
    /// Suffixes outside this lexical window are unreachable by a range scan.
    pub fn range_bounds(self) -> (String, String) {
        (
            format!("{}0", self.prefix()),
            format!("{}999", self.prefix()),
        )
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A `<Kind><digits>` identifier with its kind resolved once at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId {
    kind: AssetKind,
    raw: String,
}

impl AssetId {
    /// Parse any asset identifier.
    pub fn parse(raw: &str) -> Result<Self, SupplyChainError> {
        // Longest prefix first: "FuelOrder7" also starts with "Fuel".
        const BY_PREFIX_LEN: [AssetKind; 4] = [
            AssetKind::FuelOrder,
            AssetKind::Crude,
            AssetKind::Fuel,
            AssetKind::Plan,
        ];

        for kind in BY_PREFIX_LEN {
            if let Some(suffix) = raw.strip_prefix(kind.prefix()) {
                if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
                    return Ok(Self {
                        kind,
                        raw: raw.to_string(),
                    });
                }
            }
        }

        Err(SupplyChainError::validation(format!(
            "'{}' is not an identifier of the form <Kind><digits>",
            raw
        )))
    }

    /// Reject an id of the wrong kind for `role`, e.g. a `Fuel<N>` passed as crude id.
    pub fn expect_kind(&self, expected: AssetKind, role: &str) -> Result<(), SupplyChainError> {
        if self.kind != expected {
            return Err(SupplyChainError::validation(format!(
                "{} '{}' is not a {}<N> identifier",
                role, self.raw, expected
            )));
        }
        Ok(())
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// =============================================================================
// ASSET STATE
// =============================================================================

/// Lifecycle state stored in every asset's details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetState {
    OnWay,
    Refined,
    ReadyForDistribution,
    Delivered,
}

impl AssetState {
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetState::OnWay => "ON_WAY",
            AssetState::Refined => "REFINED",
            AssetState::ReadyForDistribution => "READY_FOR_DISTRIBUTION",
            AssetState::Delivered => "DELIVERED",
        }
    }
}

impl fmt::Display for AssetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PROOF / VEHICLE
// =============================================================================

const PROOF_URL: &str = "www.ait.gr";
const PROOF_PREIMAGE: &[u8] = b"ait";

/// Attestation stub attached to crude and order records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub url: String,
    pub hash: String,
}

impl Proof {
    /// The placeholder every record carries: a fixed URL and SHA-256("ait").
    pub fn fixed() -> Self {
        Self {
            url: PROOF_URL.to_string(),
            hash: hex::encode(Sha256::digest(PROOF_PREIMAGE)),
        }
    }
}

/// Free-form transport descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub kind: String,
    pub id: String,
}

impl Vehicle {
    pub fn vessel(id: impl Into<String>) -> Self {
        Self {
            kind: "vessel".to_string(),
            id: id.into(),
        }
    }

    pub fn truck(id: impl Into<String>) -> Self {
        Self {
            kind: "truck".to_string(),
            id: id.into(),
        }
    }
}
