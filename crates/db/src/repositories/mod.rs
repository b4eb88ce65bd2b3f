//! Repository layer for database operations.

pub mod account;
pub mod accrual;
pub mod balance;
pub mod posting;
pub mod sequence;

mod retry;

pub use account::{AccountError, AccountRepository, ResolvedAccount};
pub use accrual::{AccrualError, AccrualFailure, AccrualOutcome, AccrualRepository};
pub use balance::{BalanceError, BalanceRepository, ComputedBalance};
pub use posting::{PostedLine, PostedTransaction, PostingError, PostingRepository};
pub use sequence::{SequenceError, SequenceRepository};
