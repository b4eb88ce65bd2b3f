//! Account master lookups (consumed by the ledger, maintained elsewhere).

use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::entities::sea_orm_active_enums::AccountStatus;
use crate::entities::{accounts, sub_products};

/// Error types for account lookups.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// Sub-product not found.
    #[error("Sub-product not found: {0}")]
    SubProductNotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// An account together with its sub-product master row.
#[derive(Debug, Clone)]
pub struct ResolvedAccount {
    /// Account master row.
    pub account: accounts::Model,
    /// Sub-product master row.
    pub sub_product: sub_products::Model,
}

/// Resolves an account and its sub-product on the given connection.
///
/// # Errors
///
/// Returns `AccountError::NotFound` for an unknown account and
/// `AccountError::SubProductNotFound` for a dangling sub-product reference.
pub async fn resolve_account<C: ConnectionTrait>(
    conn: &C,
    account_no: &str,
) -> Result<ResolvedAccount, AccountError> {
    let account = accounts::Entity::find_by_id(account_no)
        .one(conn)
        .await?
        .ok_or_else(|| AccountError::NotFound(account_no.to_string()))?;

    let sub_product = sub_products::Entity::find_by_id(account.sub_product_id)
        .one(conn)
        .await?
        .ok_or(AccountError::SubProductNotFound(account.sub_product_id))?;

    Ok(ResolvedAccount {
        account,
        sub_product,
    })
}

/// Account repository for master-data reads.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets an account by number.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` for an unknown account.
    pub async fn get(&self, account_no: &str) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(account_no)
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountError::NotFound(account_no.to_string()))
    }

    /// Lists all active accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::Status.eq(AccountStatus::Active))
            .all(&self.db)
            .await
    }
}
