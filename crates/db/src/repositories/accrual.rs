//! Interest accrual batch engine.
//!
//! Each account accrues in its own REPEATABLE READ transaction with the
//! standard retry: a failure rolls back that account's work and is recorded,
//! but never aborts the batch. The outcome reports the processed count and
//! every per-account failure.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IsolationLevel, Set,
    TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, error, info};

use corebank_core::interest::daily_accrual;
use corebank_core::ledger::tranid::accrual_tran_id;
use corebank_core::ledger::DrCr;
use corebank_shared::config::AccrualConfig;

use crate::entities::sea_orm_active_enums::{AccrualStatus, DrCrFlag};
use crate::entities::{
    account_accruals, account_balances, accounts, accrual_gl_movements, accrual_trans,
    sub_products,
};
use crate::repositories::account::AccountRepository;
use crate::repositories::balance::{apply_gl_movement, BalanceError};
use crate::repositories::retry::{is_transient_db_err, with_retry, Transient};

/// Error types for accrual operations.
#[derive(Debug, thiserror::Error)]
pub enum AccrualError {
    /// No balance row exists for the account.
    #[error("No balance row for account {0}")]
    BalanceRowNotFound(String),

    /// Sub-product master row is missing.
    #[error("Sub-product not found: {0}")]
    SubProductNotFound(i32),

    /// No balance row exists for the GL.
    #[error("No balance row for GL {0}")]
    GlBalanceNotFound(String),

    /// Still contended after the standard retries.
    #[error("Accrual for account {0} still contended after retries")]
    TransientContention(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<BalanceError> for AccrualError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::AccountNotFound(acct) => Self::BalanceRowNotFound(acct),
            BalanceError::GlNotFound(gl) => Self::GlBalanceNotFound(gl),
            BalanceError::Database(db) => Self::Database(db),
        }
    }
}

impl Transient for AccrualError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::Database(err) if is_transient_db_err(err))
    }
}

/// One account's failure within a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct AccrualFailure {
    /// The account that failed.
    pub account_no: String,
    /// The failure, rendered for operators.
    pub error: String,
}

/// Outcome of a batch run: how many accounts accrued, how many were
/// skipped, and every per-account failure.
#[derive(Debug, Clone, Serialize)]
pub struct AccrualOutcome {
    /// The business date the run covered.
    pub accrual_date: NaiveDate,
    /// Accounts that accrued interest.
    pub processed: usize,
    /// Accounts skipped (no rate, zero balance, or interest rounding to zero).
    pub skipped: usize,
    /// Per-account failures, in enumeration order.
    pub errors: Vec<AccrualFailure>,
}

impl AccrualOutcome {
    /// True when every enumerated account either accrued or was skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Accrual repository: per-account atomic accrual over all active accounts.
#[derive(Debug, Clone)]
pub struct AccrualRepository {
    db: DatabaseConnection,
    accounts: AccountRepository,
    config: AccrualConfig,
}

impl AccrualRepository {
    /// Creates a new accrual repository.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: AccrualConfig) -> Self {
        let accounts = AccountRepository::new(db.clone());
        Self {
            db,
            accounts,
            config,
        }
    }

    /// Runs the daily accrual over all active accounts.
    ///
    /// Per-account failures are caught, logged and aggregated; the batch
    /// itself fails only when the accounts cannot be enumerated.
    ///
    /// # Errors
    ///
    /// Returns an error if the active-account enumeration fails.
    pub async fn run_accrual_batch(
        &self,
        accrual_date: NaiveDate,
    ) -> Result<AccrualOutcome, AccrualError> {
        let accounts = self.accounts.list_active().await?;

        info!(%accrual_date, candidates = accounts.len(), "starting accrual batch");

        let mut outcome = AccrualOutcome {
            accrual_date,
            processed: 0,
            skipped: 0,
            errors: Vec::new(),
        };

        for account in &accounts {
            match self.accrue_account(account, accrual_date).await {
                Ok(Some(amount)) => {
                    debug!(account_no = %account.account_no, %amount, "interest accrued");
                    outcome.processed += 1;
                }
                Ok(None) => outcome.skipped += 1,
                Err(err) => {
                    error!(account_no = %account.account_no, error = %err, "accrual failed");
                    outcome.errors.push(AccrualFailure {
                        account_no: account.account_no.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            processed = outcome.processed,
            skipped = outcome.skipped,
            failed = outcome.errors.len(),
            "accrual batch complete"
        );
        Ok(outcome)
    }

    /// Accrues one account in its own transaction, retrying transient
    /// contention. Returns the accrued amount, or `None` when skipped.
    async fn accrue_account(
        &self,
        account: &accounts::Model,
        accrual_date: NaiveDate,
    ) -> Result<Option<Decimal>, AccrualError> {
        with_retry(|| self.accrue_once(account, accrual_date))
            .await
            .map_err(|err| {
                if err.is_transient() {
                    AccrualError::TransientContention(account.account_no.clone())
                } else {
                    err
                }
            })
    }

    async fn accrue_once(
        &self,
        account: &accounts::Model,
        accrual_date: NaiveDate,
    ) -> Result<Option<Decimal>, AccrualError> {
        let sub_product = sub_products::Entity::find_by_id(account.sub_product_id)
            .one(&self.db)
            .await?
            .ok_or(AccrualError::SubProductNotFound(account.sub_product_id))?;

        let Some(rate) = sub_product.interest_rate.filter(|r| !r.is_zero()) else {
            return Ok(None);
        };

        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::RepeatableRead), None)
            .await?;

        let balance = account_balances::Entity::find_by_id(&account.account_no)
            .one(&txn)
            .await?
            .ok_or_else(|| AccrualError::BalanceRowNotFound(account.account_no.clone()))?;

        if balance.current_balance.is_zero() {
            return Ok(None);
        }

        let interest = daily_accrual(balance.current_balance, rate);
        if interest.is_zero() {
            // Rounds below a cent; nothing to post today.
            return Ok(None);
        }

        let tran_id = accrual_tran_id(accrual_date);

        let accrual = accrual_trans::ActiveModel {
            tran_id: Set(tran_id),
            account_no: Set(account.account_no.clone()),
            accrual_date: Set(accrual_date),
            interest_rate: Set(rate),
            amount: Set(interest),
            status: Set(AccrualStatus::Verified),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        // Debit interest expense, credit interest payable.
        let legs = [
            (&self.config.interest_expense_gl, DrCr::Debit),
            (&self.config.interest_payable_gl, DrCr::Credit),
        ];
        for (gl_num, dr_cr) in legs {
            apply_gl_movement(&txn, gl_num, dr_cr, interest).await?;

            accrual_gl_movements::ActiveModel {
                accr_id: Set(accrual.accr_id),
                gl_num: Set(gl_num.clone()),
                dr_cr_flag: Set(DrCrFlag::from(dr_cr)),
                accrual_date: Set(accrual_date),
                amount: Set(interest),
                status: Set(AccrualStatus::Verified),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        account_accruals::ActiveModel {
            account_no: Set(account.account_no.clone()),
            accrual_date: Set(accrual_date),
            interest_amount: Set(interest),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(Some(interest))
    }
}
