//! Retry of transient database contention.
//!
//! Locked read-modify-write units can hit deadlocks or lock waits under
//! concurrency. Transient failures re-execute the whole unit (the enclosing
//! transaction rolled back on drop); everything else surfaces immediately.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use sea_orm::DbErr;
use tracing::warn;

/// Maximum attempts per unit, including the first.
pub(crate) const MAX_ATTEMPTS: u32 = 3;

/// Classifies a database error as transient contention worth retrying.
pub(crate) fn is_transient_db_err(err: &DbErr) -> bool {
    let msg = err.to_string().to_lowercase();
    msg.contains("deadlock")
        || msg.contains("lock timeout")
        || msg.contains("lock not available")
        || msg.contains("could not serialize")
}

/// Errors that know whether a retry can help.
pub(crate) trait Transient {
    fn is_transient(&self) -> bool;
}

/// Runs `op` up to [`MAX_ATTEMPTS`] times, re-executing the whole unit on
/// transient errors with a short backoff. Terminal errors return immediately.
pub(crate) async fn with_retry<T, E, F, Fut>(op: F) -> Result<T, E>
where
    E: Transient + Display,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < MAX_ATTEMPTS => {
                warn!(attempt, error = %err, "transient contention, retrying");
                tokio::time::sleep(Duration::from_millis(50 * u64::from(attempt))).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, thiserror::Error)]
    enum TestError {
        #[error("transient")]
        Transient,
        #[error("terminal")]
        Terminal,
    }

    impl Transient for TestError {
        fn is_transient(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[tokio::test]
    async fn test_retries_transient_until_success() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, TestError> = with_retry(|| async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(TestError::Transient)
            } else {
                Ok(n)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_transient_surfaces_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), TestError> = with_retry(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(TestError::Transient)
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_terminal_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), TestError> = with_retry(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(TestError::Terminal)
        })
        .await;
        assert!(matches!(result, Err(TestError::Terminal)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transient_db_err_classification() {
        let err = DbErr::Custom("ERROR: deadlock detected".to_string());
        assert!(is_transient_db_err(&err));
        let err = DbErr::Custom("ERROR: could not serialize access".to_string());
        assert!(is_transient_db_err(&err));
        let err = DbErr::Custom("ERROR: duplicate key value".to_string());
        assert!(!is_transient_db_err(&err));
    }
}
