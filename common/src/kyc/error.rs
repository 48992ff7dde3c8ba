// KYC Error types
// Defines all error conditions for KYC table operations

use thiserror::Error;

/// KYC record store errors
///
/// None of these are retried internally, they are surfaced to the caller
/// as soon as they happen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KycError {
    /// Wrong number of arguments for an operation
    /// Always a caller bug
    #[error("Incorrect number of arguments for '{operation}': expected {expected}, got {provided}")]
    ArgumentCount {
        operation: String,
        expected: usize,
        provided: usize,
    },

    /// Operation name not handled by the dispatcher
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    /// Table creation failed, was re-attempted, or the table is missing
    #[error("Schema error: {0}")]
    Schema(String),

    /// Insert on an enrollment ID that already exists
    #[error("KYC record '{0}' already exists")]
    DuplicateKey(String),

    /// Replace or query on an enrollment ID that does not exist
    #[error("KYC record '{0}' not found")]
    NotFound(String),

    /// Malformed calendar date
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Enrollment ID is the empty string
    #[error("Enrollment ID must not be empty")]
    EmptyEnrollId,

    /// Query result could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for KYC operations
pub type KycResult<T> = Result<T, KycError>;
