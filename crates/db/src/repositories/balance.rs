//! Balance store: locked read-modify-write on account and GL balance rows.
//!
//! Every update takes an exclusive row lock (`SELECT ... FOR UPDATE`) on the
//! single balance row for the key, applies a fixed sign convention (debit
//! adds, credit subtracts) and persists the new value inside the caller's
//! transaction. Lock scopes are per key; two updates contend only when they
//! touch the same account or GL.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IsolationLevel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::debug;

use corebank_core::ledger::DrCr;

use crate::entities::{account_balances, accounts, gl_balances, ledger_lines};
use crate::entities::sea_orm_active_enums::DrCrFlag;
use crate::repositories::retry::{is_transient_db_err, with_retry, Transient};

/// Error types for balance operations.
#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    /// No balance row exists for the account.
    #[error("No balance row for account {0}")]
    AccountNotFound(String),

    /// No balance row exists for the GL.
    #[error("No balance row for GL {0}")]
    GlNotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl Transient for BalanceError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::Database(err) if is_transient_db_err(err))
    }
}

/// Computed balance view for an account: the stored available balance
/// adjusted by the day's posted activity.
#[derive(Debug, Clone, Serialize)]
pub struct ComputedBalance {
    /// The account.
    pub account_no: String,
    /// Account display name.
    pub acct_name: String,
    /// Stored available balance.
    pub available_balance: Decimal,
    /// Sum of the day's posted debits.
    pub todays_debits: Decimal,
    /// Sum of the day's posted credits.
    pub todays_credits: Decimal,
    /// `available_balance + todays_credits - todays_debits`.
    pub computed_balance: Decimal,
    /// The day the activity sums cover.
    pub as_of: NaiveDate,
}

fn shift(balance: Decimal, dr_cr: DrCr, amount: Decimal) -> Decimal {
    match dr_cr {
        DrCr::Debit => balance + amount,
        DrCr::Credit => balance - amount,
    }
}

/// Applies a movement to an account balance row under an exclusive row lock
/// and returns the new balance.
///
/// # Errors
///
/// Returns `BalanceError::AccountNotFound` if no balance row exists.
pub async fn apply_account_movement<C: ConnectionTrait>(
    conn: &C,
    account_no: &str,
    dr_cr: DrCr,
    amount: Decimal,
) -> Result<Decimal, BalanceError> {
    let row = account_balances::Entity::find_by_id(account_no)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or_else(|| BalanceError::AccountNotFound(account_no.to_string()))?;

    let new_balance = shift(row.current_balance, dr_cr, amount);
    debug!(account_no, old = %row.current_balance, new = %new_balance, "account balance updated");

    let mut active: account_balances::ActiveModel = row.into();
    active.current_balance = Set(new_balance);
    // current = available after each transaction; the computed view layers
    // the day's line sums on top of this settled figure.
    active.available_balance = Set(new_balance);
    active.last_updated = Set(Utc::now().into());
    active.update(conn).await?;

    Ok(new_balance)
}

/// Applies a movement to a GL balance row under an exclusive row lock and
/// returns the new balance.
///
/// # Errors
///
/// Returns `BalanceError::GlNotFound` if no balance row exists.
pub async fn apply_gl_movement<C: ConnectionTrait>(
    conn: &C,
    gl_num: &str,
    dr_cr: DrCr,
    amount: Decimal,
) -> Result<Decimal, BalanceError> {
    let row = gl_balances::Entity::find_by_id(gl_num)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or_else(|| BalanceError::GlNotFound(gl_num.to_string()))?;

    let new_balance = shift(row.current_balance, dr_cr, amount);
    debug!(gl_num, old = %row.current_balance, new = %new_balance, "GL balance updated");

    let mut active: gl_balances::ActiveModel = row.into();
    active.current_balance = Set(new_balance);
    active.last_updated = Set(Utc::now().into());
    active.update(conn).await?;

    Ok(new_balance)
}

/// Sums the day's posted lines for an account on one side of the book.
async fn day_sum<C: ConnectionTrait>(
    conn: &C,
    account_no: &str,
    as_of: NaiveDate,
    flag: DrCrFlag,
) -> Result<Decimal, DbErr> {
    let total: Option<Option<Decimal>> = ledger_lines::Entity::find()
        .select_only()
        .column_as(ledger_lines::Column::LcyAmt.sum(), "total")
        .filter(ledger_lines::Column::AccountNo.eq(account_no))
        .filter(ledger_lines::Column::TranDate.eq(as_of))
        .filter(ledger_lines::Column::DrCrFlag.eq(flag))
        .into_tuple()
        .one(conn)
        .await?;
    Ok(total.flatten().unwrap_or(Decimal::ZERO))
}

/// Computes the available balance for pre-debit checks: stored available
/// balance plus the day's credits minus the day's debits.
///
/// # Errors
///
/// Returns `BalanceError::AccountNotFound` if no balance row exists.
pub async fn computed_available<C: ConnectionTrait>(
    conn: &C,
    account_no: &str,
    as_of: NaiveDate,
) -> Result<Decimal, BalanceError> {
    let row = account_balances::Entity::find_by_id(account_no)
        .one(conn)
        .await?
        .ok_or_else(|| BalanceError::AccountNotFound(account_no.to_string()))?;

    let debits = day_sum(conn, account_no, as_of, DrCrFlag::Debit).await?;
    let credits = day_sum(conn, account_no, as_of, DrCrFlag::Credit).await?;

    Ok(row.available_balance + credits - debits)
}

/// Balance repository: read views plus standalone locked updates.
#[derive(Debug, Clone)]
pub struct BalanceRepository {
    db: DatabaseConnection,
}

impl BalanceRepository {
    /// Creates a new balance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a movement to an account balance in its own transaction,
    /// retrying transient contention.
    ///
    /// # Errors
    ///
    /// Returns an error if the balance row is missing or the update fails.
    pub async fn update_account_balance(
        &self,
        account_no: &str,
        dr_cr: DrCr,
        amount: Decimal,
    ) -> Result<Decimal, BalanceError> {
        with_retry(|| async {
            let txn = self
                .db
                .begin_with_config(Some(IsolationLevel::RepeatableRead), None)
                .await?;
            let balance = apply_account_movement(&txn, account_no, dr_cr, amount).await?;
            txn.commit().await?;
            Ok(balance)
        })
        .await
    }

    /// Applies a movement to a GL balance in its own transaction, retrying
    /// transient contention.
    ///
    /// # Errors
    ///
    /// Returns an error if the balance row is missing or the update fails.
    pub async fn update_gl_balance(
        &self,
        gl_num: &str,
        dr_cr: DrCr,
        amount: Decimal,
    ) -> Result<Decimal, BalanceError> {
        with_retry(|| async {
            let txn = self
                .db
                .begin_with_config(Some(IsolationLevel::RepeatableRead), None)
                .await?;
            let balance = apply_gl_movement(&txn, gl_num, dr_cr, amount).await?;
            txn.commit().await?;
            Ok(balance)
        })
        .await
    }

    /// Current stored balance for an account; zero when no row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn account_balance(&self, account_no: &str) -> Result<Decimal, BalanceError> {
        let balance = account_balances::Entity::find_by_id(account_no)
            .one(&self.db)
            .await?
            .map_or(Decimal::ZERO, |row| row.current_balance);
        Ok(balance)
    }

    /// Current stored balance for a GL; zero when no row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn gl_balance(&self, gl_num: &str) -> Result<Decimal, BalanceError> {
        let balance = gl_balances::Entity::find_by_id(gl_num)
            .one(&self.db)
            .await?
            .map_or(Decimal::ZERO, |row| row.current_balance);
        Ok(balance)
    }

    /// Computed balance view for an account as of a business date.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError::AccountNotFound` if the account or its balance
    /// row is missing.
    pub async fn computed_balance(
        &self,
        account_no: &str,
        as_of: NaiveDate,
    ) -> Result<ComputedBalance, BalanceError> {
        let account = accounts::Entity::find_by_id(account_no)
            .one(&self.db)
            .await?
            .ok_or_else(|| BalanceError::AccountNotFound(account_no.to_string()))?;

        let row = account_balances::Entity::find_by_id(account_no)
            .one(&self.db)
            .await?
            .ok_or_else(|| BalanceError::AccountNotFound(account_no.to_string()))?;

        let debits = day_sum(&self.db, account_no, as_of, DrCrFlag::Debit).await?;
        let credits = day_sum(&self.db, account_no, as_of, DrCrFlag::Credit).await?;

        Ok(ComputedBalance {
            account_no: account_no.to_string(),
            acct_name: account.acct_name,
            available_balance: row.available_balance,
            todays_debits: debits,
            todays_credits: credits,
            computed_balance: row.available_balance + credits - debits,
            as_of,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debit_adds_credit_subtracts() {
        assert_eq!(shift(dec!(100.00), DrCr::Debit, dec!(25.00)), dec!(125.00));
        assert_eq!(shift(dec!(100.00), DrCr::Credit, dec!(25.00)), dec!(75.00));
    }

    #[test]
    fn test_shift_can_go_negative() {
        // Sign policy is enforced by the validator, not the store.
        assert_eq!(shift(dec!(10.00), DrCr::Credit, dec!(25.00)), dec!(-15.00));
    }
}
