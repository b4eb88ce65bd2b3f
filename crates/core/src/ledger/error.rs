//! Ledger error types for validation failures.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by the pure transaction validator.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transaction must have at least 2 lines.
    #[error("Transaction must have at least 2 lines")]
    InsufficientLines,

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// Debit amount does not equal credit amount.
    #[error("Debit amount does not equal credit amount. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount in local currency.
        debit: Decimal,
        /// Total credit amount in local currency.
        credit: Decimal,
    },

    /// Liability accounts can never go negative.
    #[error("Debit would drive liability account {0} negative")]
    LiabilityOverdraw(String),

    /// Asset accounts can only go negative when on an overdraft product.
    #[error("Debit would drive non-overdraft asset account {0} negative")]
    AssetOverdraw(String),

    /// Debit exceeds the computed available balance.
    #[error(
        "Insufficient balance for account {account_no}: available {available}, debit {requested}"
    )]
    InsufficientBalance {
        /// The account being debited.
        account_no: String,
        /// Computed available balance.
        available: Decimal,
        /// Requested debit amount.
        requested: Decimal,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::Unbalanced { .. } => "UNBALANCED_TRANSACTION",
            Self::LiabilityOverdraw(_) | Self::AssetOverdraw(_) => "POLICY_VIOLATION",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
        }
    }
}
