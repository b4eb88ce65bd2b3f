//! Ledger domain types for transaction creation and validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Debit/credit flag for a ledger line.
///
/// The balance store applies a fixed asset-side sign convention:
/// debits increase a stored balance, credits decrease it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrCr {
    /// Debit leg.
    #[serde(rename = "D")]
    Debit,
    /// Credit leg.
    #[serde(rename = "C")]
    Credit,
}

/// Transaction status.
///
/// API postings are created in `Entry`; system-generated accrual lines are
/// created directly in `Verified`. The full three-state progression is kept
/// for a future maker-checker workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranStatus {
    /// Captured, not yet posted.
    Entry,
    /// Posted to the ledger.
    Posted,
    /// Verified (immutable).
    Verified,
}

/// Asset/liability classification of a GL leaf account.
///
/// Resolved from the chart-of-accounts numbering: the leading digit of a
/// GL number determines its side of the balance sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlClass {
    /// Deposit-side GLs (1xxxxxxxx).
    Liability,
    /// Loan/overdraft-side GLs (2xxxxxxxx).
    Asset,
    /// Income GLs (3xxxxxxxx).
    Income,
    /// Expense GLs (4xxxxxxxx).
    Expense,
}

impl GlClass {
    /// Classifies a GL number by its leading digit.
    ///
    /// Returns `None` for office/internal GLs outside the classified ranges;
    /// only the sufficiency check applies to those.
    #[must_use]
    pub fn from_gl_num(gl_num: &str) -> Option<Self> {
        match gl_num.chars().next() {
            Some('1') => Some(Self::Liability),
            Some('2') => Some(Self::Asset),
            Some('3') => Some(Self::Income),
            Some('4') => Some(Self::Expense),
            _ => None,
        }
    }
}

/// Input for a single ledger line in a posting request.
#[derive(Debug, Clone)]
pub struct LineInput {
    /// The account to post against.
    pub account_no: String,
    /// Debit or credit.
    pub dr_cr: DrCr,
    /// Transaction currency code (ISO 4217).
    pub tran_ccy: String,
    /// Amount in transaction currency.
    pub fcy_amt: Decimal,
    /// Exchange rate to local currency.
    pub exchange_rate: Decimal,
    /// Amount in local currency; balance checks and totals use this.
    pub lcy_amt: Decimal,
    /// Optional user-defined tag.
    pub udf1: Option<String>,
}

/// Input for posting a transaction.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    /// Value date of the transaction.
    pub value_date: NaiveDate,
    /// Free-text narration, echoed on every line.
    pub narration: String,
    /// The ledger lines, in caller-supplied order.
    pub lines: Vec<LineInput>,
}

/// Transaction totals in local currency.
#[derive(Debug, Clone)]
pub struct TransactionTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether debits equal credits exactly.
    pub is_balanced: bool,
}

impl TransactionTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}
