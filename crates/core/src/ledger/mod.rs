//! Double-entry posting logic.
//!
//! This module implements the ledger-facing core:
//! - Domain types for transaction lines and statuses
//! - Balance and debit-policy validation
//! - Transaction id generation
//! - Error types for ledger operations

pub mod error;
pub mod tranid;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use types::{DrCr, GlClass, LineInput, TranStatus, TransactionInput, TransactionTotals};
pub use validation::{is_overdraft_account, validate_debit_policy, validate_lines};
