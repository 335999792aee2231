//! # Error Types
//!
//! Every operation returns the first error it meets and commits nothing.
//! The message is what the caller sees; `kind()` is for tests and metrics.

use fc_01_ledger_gateway::KVStoreError;
use thiserror::Error;

/// Errors produced by the supply-chain chaincode.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SupplyChainError {
    /// Malformed or missing arguments, wrong argument count, bad prefix.
    #[error("validation error: {0}")]
    Validation(String),

    /// Identifier already exists, or the ledger is already bootstrapped.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Referenced asset, parent, plan or account is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Lifecycle transition not allowed from the current state.
    #[error("invalid state: {0}")]
    State(String),

    /// Negative or non-finite payment amount.
    #[error("payment rejected: {0}")]
    Payment(String),

    /// Ledger gateway failure.
    #[error("storage error: {0}")]
    Storage(#[from] KVStoreError),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SupplyChainError {
    fn from(err: serde_json::Error) -> Self {
        SupplyChainError::Serialization(err.to_string())
    }
}

/// Coarse error category, stable across message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    State,
    Payment,
    Storage,
    Serialization,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "not_found",
            ErrorKind::State => "state",
            ErrorKind::Payment => "payment",
            ErrorKind::Storage => "storage",
            ErrorKind::Serialization => "serialization",
        }
    }
}

impl SupplyChainError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SupplyChainError::Validation(_) => ErrorKind::Validation,
            SupplyChainError::Conflict(_) => ErrorKind::Conflict,
            SupplyChainError::NotFound(_) => ErrorKind::NotFound,
            SupplyChainError::State(_) => ErrorKind::State,
            SupplyChainError::Payment(_) => ErrorKind::Payment,
            SupplyChainError::Storage(_) => ErrorKind::Storage,
            SupplyChainError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        SupplyChainError::Validation(reason.into())
    }

    pub(crate) fn conflict(reason: impl Into<String>) -> Self {
        SupplyChainError::Conflict(reason.into())
    }

    pub(crate) fn not_found(reason: impl Into<String>) -> Self {
        SupplyChainError::NotFound(reason.into())
    }
}
