//! Sequence allocator: per-scope counters for account-number generation.
//!
//! Each scope owns one counter row, created lazily at zero under the same
//! exclusive lock that protects the increment. Ceilings are terminal: an
//! exhausted scope stays exhausted until an operator resets the counter, and
//! the failed allocation leaves the counter unchanged.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IsolationLevel, QuerySelect, Set,
    TransactionTrait,
};
use tracing::info;

use corebank_core::sequence::SequenceScope;

use crate::entities::account_sequences;
use crate::repositories::retry::{is_transient_db_err, with_retry, Transient};

/// Error types for sequence allocation.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// The scope's ceiling has been reached. Terminal, never retried.
    #[error("Sequence exhausted for scope {scope}: ceiling {max} reached")]
    Exhausted {
        /// The exhausted scope key.
        scope: String,
        /// The scope's ceiling.
        max: i32,
    },

    /// Still contended after the standard retries.
    #[error("Sequence allocation for scope {0} still contended after retries")]
    TransientContention(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl Transient for SequenceError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::Database(err) if is_transient_db_err(err))
    }
}

/// Sequence repository: atomic per-scope counter allocation.
#[derive(Debug, Clone)]
pub struct SequenceRepository {
    db: DatabaseConnection,
}

impl SequenceRepository {
    /// Creates a new sequence repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Allocates the next value for a scope.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::Exhausted` when the ceiling is reached and
    /// `SequenceError::TransientContention` when retries are used up.
    pub async fn next(&self, scope: &SequenceScope) -> Result<i32, SequenceError> {
        with_retry(|| self.next_once(scope)).await.map_err(|err| {
            if err.is_transient() {
                SequenceError::TransientContention(scope.key())
            } else {
                err
            }
        })
    }

    async fn next_once(&self, scope: &SequenceScope) -> Result<i32, SequenceError> {
        let key = scope.key();
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::RepeatableRead), None)
            .await?;

        let current = match account_sequences::Entity::find_by_id(&key)
            .lock_exclusive()
            .one(&txn)
            .await?
        {
            Some(row) => row.seq_number,
            None => {
                // First allocation for this scope: the counter starts at
                // zero and is owned by this transaction until commit. Two
                // racing first allocations both see an absent row; the
                // loser's insert hits the primary key and is retried as
                // contention.
                let init = account_sequences::ActiveModel {
                    scope_key: Set(key.clone()),
                    seq_number: Set(0),
                    last_updated: Set(Utc::now().into()),
                }
                .insert(&txn)
                .await;
                if let Err(err) = init {
                    if err.to_string().to_lowercase().contains("duplicate key") {
                        return Err(SequenceError::Database(DbErr::Custom(format!(
                            "could not serialize first allocation for scope {key}: {err}"
                        ))));
                    }
                    return Err(err.into());
                }
                0
            }
        };

        let next = current + 1;
        if next > scope.max() {
            // Dropping the transaction rolls back; the counter is unchanged.
            return Err(SequenceError::Exhausted {
                scope: key,
                max: scope.max(),
            });
        }

        account_sequences::ActiveModel {
            scope_key: Set(key.clone()),
            seq_number: Set(next),
            last_updated: Set(Utc::now().into()),
        }
        .update(&txn)
        .await?;
        txn.commit().await?;

        info!(scope = %key, seq = next, "sequence allocated");
        Ok(next)
    }
}
