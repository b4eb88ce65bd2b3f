//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Referenced account, GL or transaction does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request failed validation before any write.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Proposed transaction does not balance (debits != credits).
    #[error("Unbalanced transaction: {0}")]
    Unbalanced(String),

    /// Account-type negative-balance policy rejected the operation.
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// Debit exceeds the account's computed available balance.
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    /// A sequence scope reached its digit-width ceiling.
    #[error("Sequence exhausted: {0}")]
    SequenceExhausted(String),

    /// Lock contention persisted past the retry bound.
    #[error("Transient contention: {0}")]
    TransientContention(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Unbalanced(_) | Self::PolicyViolation(_) | Self::InsufficientBalance(_) => 422,
            Self::SequenceExhausted(_) => 409,
            Self::TransientContention(_) => 503,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unbalanced(_) => "UNBALANCED_TRANSACTION",
            Self::PolicyViolation(_) => "POLICY_VIOLATION",
            Self::InsufficientBalance(_) => "INSUFFICIENT_BALANCE",
            Self::SequenceExhausted(_) => "SEQUENCE_EXHAUSTED",
            Self::TransientContention(_) => "TRANSIENT_CONTENTION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
