//! Custom error types for gst-ledger
//!
//! This module defines the error hierarchy for the ledger using thiserror.
//! None of these errors are fatal: callers either recover automatically
//! (empty-ledger fallback on load) or report them to the user.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A creation request was missing a field or had a malformed one
    #[error("Validation error: {0}")]
    Validation(String),

    /// The ledger could not be written to its storage slot.
    ///
    /// The in-memory ledger still holds the mutation when this is returned.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Export was requested for a ledger with no transactions
    #[error("No transactions to export")]
    EmptyLedger,

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl LedgerError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a persistence (storage write) error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Check if this is the empty-ledger export notice
    pub fn is_empty_ledger(&self) -> bool {
        matches!(self, Self::EmptyLedger)
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
