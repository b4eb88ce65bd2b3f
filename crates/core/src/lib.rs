//! Core accounting logic for Corebank.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry posting types and validation
//! - `interest` - Daily interest accrual arithmetic
//! - `sequence` - Account-number sequence scopes and formatting

pub mod interest;
pub mod ledger;
pub mod sequence;
