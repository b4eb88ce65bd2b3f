//! Ledger posting engine: atomic multi-line postings with GL movements.
//!
//! One posting is one REPEATABLE READ transaction: resolve and validate every
//! line, then per line apply the locked account and GL balance updates, write
//! the ledger line and its GL movement (capturing `balance_after`), and
//! commit. Any failure after validation rolls the whole unit back; the
//! transaction rolls back on drop. The whole unit retries on transient
//! contention.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, info};

use corebank_core::ledger::tranid::{line_id, posting_tran_id};
use corebank_core::ledger::{
    self, DrCr, GlClass, LedgerError, TranStatus, TransactionInput,
};

use crate::entities::sea_orm_active_enums::{DrCrFlag, SubProductStatus, TranStatus as DbTranStatus};
use crate::entities::{accounts, gl_movements, ledger_lines};
use crate::repositories::account::{resolve_account, AccountError, ResolvedAccount};
use crate::repositories::balance::{
    apply_account_movement, apply_gl_movement, computed_available, BalanceError,
};
use crate::repositories::retry::{is_transient_db_err, with_retry, Transient};

/// Error types for posting operations.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// A validation rule was violated.
    #[error(transparent)]
    Validation(#[from] LedgerError),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Sub-product master row is missing.
    #[error("Sub-product not found: {0}")]
    SubProductNotFound(i32),

    /// The account's sub-product does not accept postings.
    #[error("Sub-product {name} for account {account_no} is inactive")]
    SubProductInactive {
        /// The account being posted against.
        account_no: String,
        /// Sub-product display name.
        name: String,
    },

    /// No balance row exists for the account.
    #[error("No balance row for account {0}")]
    BalanceRowNotFound(String),

    /// No balance row exists for the GL.
    #[error("No balance row for GL {0}")]
    GlBalanceNotFound(String),

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(String),

    /// Still contended after the standard retries.
    #[error("Posting aborted after repeated contention")]
    TransientContention,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<BalanceError> for PostingError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::AccountNotFound(acct) => Self::BalanceRowNotFound(acct),
            BalanceError::GlNotFound(gl) => Self::GlBalanceNotFound(gl),
            BalanceError::Database(db) => Self::Database(db),
        }
    }
}

impl From<AccountError> for PostingError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(acct) => Self::AccountNotFound(acct),
            AccountError::SubProductNotFound(id) => Self::SubProductNotFound(id),
            AccountError::Database(db) => Self::Database(db),
        }
    }
}

impl Transient for PostingError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::Database(err) if is_transient_db_err(err))
    }
}

/// A posted ledger line with its resolved account name.
#[derive(Debug, Clone, Serialize)]
pub struct PostedLine {
    /// Line id: `{tranId}-{lineSeq}`.
    pub line_id: String,
    /// One-based position within the transaction.
    pub line_seq: i32,
    /// The account posted against.
    pub account_no: String,
    /// Resolved account display name.
    pub account_name: String,
    /// Debit or credit.
    pub dr_cr: DrCr,
    /// Transaction currency code.
    pub tran_ccy: String,
    /// Amount in transaction currency.
    pub fcy_amt: Decimal,
    /// Exchange rate to local currency.
    pub exchange_rate: Decimal,
    /// Amount in local currency.
    pub lcy_amt: Decimal,
    /// Optional user-defined tag.
    pub udf1: Option<String>,
}

/// A posted transaction with its full line set.
#[derive(Debug, Clone, Serialize)]
pub struct PostedTransaction {
    /// Transaction id.
    pub tran_id: String,
    /// Booking date.
    pub tran_date: NaiveDate,
    /// Value date.
    pub value_date: NaiveDate,
    /// Narration echoed on every line.
    pub narration: String,
    /// Overall status.
    pub status: TranStatus,
    /// Whether debit and credit totals match.
    pub balanced: bool,
    /// Total debit amount in local currency.
    pub total_debit: Decimal,
    /// Total credit amount in local currency.
    pub total_credit: Decimal,
    /// The lines, in original order.
    pub lines: Vec<PostedLine>,
}

/// Escapes LIKE metacharacters so they match themselves.
fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Posting repository: atomic transaction posting and retrieval.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
}

impl PostingRepository {
    /// Creates a new posting repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a transaction atomically, retrying transient contention by
    /// re-executing the whole unit.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, a collaborator row is missing,
    /// or the unit is still contended after retries.
    pub async fn post(&self, input: &TransactionInput) -> Result<PostedTransaction, PostingError> {
        with_retry(|| self.post_once(input)).await.map_err(|err| {
            if err.is_transient() {
                PostingError::TransientContention
            } else {
                err
            }
        })
    }

    async fn post_once(&self, input: &TransactionInput) -> Result<PostedTransaction, PostingError> {
        let totals = ledger::validate_lines(&input.lines)?;

        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::RepeatableRead), None)
            .await?;
        let tran_date = Utc::now().date_naive();

        let resolved = self.resolve_lines(&txn, input).await?;
        self.check_debit_policies(&txn, input, &resolved, tran_date).await?;

        let tran_id = posting_tran_id(tran_date);
        let mut lines = Vec::with_capacity(input.lines.len());

        for (idx, (line, acct)) in input.lines.iter().zip(&resolved).enumerate() {
            let line_seq = i32::try_from(idx + 1).unwrap_or(i32::MAX);
            let id = line_id(&tran_id, line_seq);

            let account_balance =
                apply_account_movement(&txn, &line.account_no, line.dr_cr, line.lcy_amt).await?;
            let gl_balance =
                apply_gl_movement(&txn, &acct.account.gl_num, line.dr_cr, line.lcy_amt).await?;

            ledger_lines::ActiveModel {
                tran_id: Set(id.clone()),
                line_seq: Set(line_seq),
                tran_date: Set(tran_date),
                value_date: Set(input.value_date),
                dr_cr_flag: Set(DrCrFlag::from(line.dr_cr)),
                tran_status: Set(DbTranStatus::Entry),
                account_no: Set(line.account_no.clone()),
                tran_ccy: Set(line.tran_ccy.clone()),
                fcy_amt: Set(line.fcy_amt),
                exchange_rate: Set(line.exchange_rate),
                lcy_amt: Set(line.lcy_amt),
                narration: Set(Some(input.narration.clone())),
                udf1: Set(line.udf1.clone()),
            }
            .insert(&txn)
            .await?;

            gl_movements::ActiveModel {
                tran_id: Set(id.clone()),
                gl_num: Set(acct.account.gl_num.clone()),
                dr_cr_flag: Set(DrCrFlag::from(line.dr_cr)),
                tran_date: Set(tran_date),
                value_date: Set(input.value_date),
                amount: Set(line.lcy_amt),
                balance_after: Set(gl_balance),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            debug!(line_id = %id, account_balance = %account_balance, "line posted");

            lines.push(PostedLine {
                line_id: id,
                line_seq,
                account_no: line.account_no.clone(),
                account_name: acct.account.acct_name.clone(),
                dr_cr: line.dr_cr,
                tran_ccy: line.tran_ccy.clone(),
                fcy_amt: line.fcy_amt,
                exchange_rate: line.exchange_rate,
                lcy_amt: line.lcy_amt,
                udf1: line.udf1.clone(),
            });
        }

        txn.commit().await?;
        info!(tran_id = %tran_id, lines = lines.len(), total = %totals.debit, "transaction posted");

        Ok(PostedTransaction {
            tran_id,
            tran_date,
            value_date: input.value_date,
            narration: input.narration.clone(),
            status: TranStatus::Entry,
            balanced: totals.is_balanced,
            total_debit: totals.debit,
            total_credit: totals.credit,
            lines,
        })
    }

    /// Resolves every line's account and checks the sub-product accepts
    /// postings. Validation precedes any write.
    async fn resolve_lines(
        &self,
        txn: &DatabaseTransaction,
        input: &TransactionInput,
    ) -> Result<Vec<ResolvedAccount>, PostingError> {
        let mut resolved = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let acct = resolve_account(txn, &line.account_no).await?;
            if acct.sub_product.status != SubProductStatus::Active {
                return Err(PostingError::SubProductInactive {
                    account_no: line.account_no.clone(),
                    name: acct.sub_product.name,
                });
            }
            resolved.push(acct);
        }
        Ok(resolved)
    }

    /// Runs the debit policy for every debit line against the computed
    /// available balance.
    async fn check_debit_policies(
        &self,
        txn: &DatabaseTransaction,
        input: &TransactionInput,
        resolved: &[ResolvedAccount],
        tran_date: NaiveDate,
    ) -> Result<(), PostingError> {
        for (line, acct) in input.lines.iter().zip(resolved) {
            if line.dr_cr == DrCr::Debit {
                let available = computed_available(txn, &line.account_no, tran_date).await?;
                ledger::validate_debit_policy(
                    &line.account_no,
                    GlClass::from_gl_num(&acct.account.gl_num),
                    available,
                    line.lcy_amt,
                )?;
            }
        }
        Ok(())
    }

    /// Reassembles a posted transaction from the lines sharing its prefix,
    /// in original line order.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::NotFound` when no lines carry the prefix.
    pub async fn get(&self, tran_id: &str) -> Result<PostedTransaction, PostingError> {
        // The prefix feeds a LIKE pattern; wildcards in the caller-supplied
        // id must match literally, not fan out across transactions.
        let prefix = format!("{}-", escape_like(tran_id));
        let rows = ledger_lines::Entity::find()
            .filter(ledger_lines::Column::TranId.starts_with(prefix))
            .order_by_asc(ledger_lines::Column::LineSeq)
            .all(&self.db)
            .await?;

        let Some(first) = rows.first() else {
            return Err(PostingError::NotFound(tran_id.to_string()));
        };

        let tran_date = first.tran_date;
        let value_date = first.value_date;
        let narration = first.narration.clone().unwrap_or_default();
        let status = TranStatus::from(first.tran_status.clone());

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let mut lines = Vec::with_capacity(rows.len());

        for row in rows {
            let account = accounts::Entity::find_by_id(&row.account_no)
                .one(&self.db)
                .await?
                .ok_or_else(|| PostingError::AccountNotFound(row.account_no.clone()))?;

            let dr_cr = DrCr::from(row.dr_cr_flag.clone());
            match dr_cr {
                DrCr::Debit => total_debit += row.lcy_amt,
                DrCr::Credit => total_credit += row.lcy_amt,
            }

            lines.push(PostedLine {
                line_id: row.tran_id,
                line_seq: row.line_seq,
                account_no: row.account_no,
                account_name: account.acct_name,
                dr_cr,
                tran_ccy: row.tran_ccy,
                fcy_amt: row.fcy_amt,
                exchange_rate: row.exchange_rate,
                lcy_amt: row.lcy_amt,
                udf1: row.udf1,
            });
        }

        Ok(PostedTransaction {
            tran_id: tran_id.to_string(),
            tran_date,
            value_date,
            narration,
            status,
            balanced: total_debit == total_credit,
            total_debit,
            total_credit,
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_like_metacharacters_match_themselves() {
        assert_eq!(escape_like("TRN-2026%"), "TRN-2026\\%");
        assert_eq!(escape_like("TRN_1"), "TRN\\_1");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_plain_tran_id_unchanged() {
        assert_eq!(
            escape_like("TRN-20260825-1234567001"),
            "TRN-20260825-1234567001"
        );
    }
}
