//! Custom error types for pocket-ledger
//!
//! This module defines the error hierarchy for the ledger using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{Category, Kind};

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

    /// Ledger table encoding errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Per-field validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backing ledger file or its directory cannot be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A category that does not belong to the vocabulary of the chosen kind
    #[error("Category '{category}' is not valid for {kind} entries")]
    InvalidCategory { kind: Kind, category: Category },

    /// A persisted row that cannot be interpreted
    #[error("Corrupt record at row {row}: {reason}")]
    CorruptRecord { row: usize, reason: String },
}

impl LedgerError {
    /// Create a corrupt record error for a data row (1-based; row 0 is the header)
    pub fn corrupt(row: usize, reason: impl Into<String>) -> Self {
        Self::CorruptRecord {
            row,
            reason: reason.into(),
        }
    }

    /// Check if the backing storage could not be used
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidCategory { .. })
    }
}

// Implement From traits for common error types

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

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Self::StorageUnavailable(err.to_string())
        } else {
            Self::Csv(err.to_string())
        }
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
