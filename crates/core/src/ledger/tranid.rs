//! Transaction id generation.
//!
//! Ids are derived from the posting date, the current time and a random
//! component: globally unique with overwhelming probability, but not
//! guaranteed sortable by creation time. Individual line ids append the
//! one-based line sequence: `{tranId}-{lineSeq}`.

use chrono::{NaiveDate, Utc};
use rand::Rng;

/// Prefix for API-posted transactions.
const POSTING_PREFIX: &str = "TRN";

/// Prefix for system-generated interest accruals.
const ACCRUAL_PREFIX: &str = "ACCR";

/// Generates a transaction id for an API posting.
#[must_use]
pub fn posting_tran_id(tran_date: NaiveDate) -> String {
    tran_id(POSTING_PREFIX, tran_date)
}

/// Generates a transaction id for an interest accrual.
#[must_use]
pub fn accrual_tran_id(accrual_date: NaiveDate) -> String {
    tran_id(ACCRUAL_PREFIX, accrual_date)
}

/// Builds the id of a single line within a transaction.
#[must_use]
pub fn line_id(tran_id: &str, line_seq: i32) -> String {
    format!("{tran_id}-{line_seq}")
}

fn tran_id(prefix: &str, date: NaiveDate) -> String {
    let date_part = date.format("%Y%m%d");
    // Millisecond clock truncated to its fast-moving low digits.
    let millis = Utc::now().timestamp_millis() % 10_000_000;
    let random_part: u32 = rand::rng().random_range(0..1000);
    format!("{prefix}-{date_part}-{millis:07}{random_part:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn test_posting_id_shape() {
        let id = posting_tran_id(date());
        assert!(id.starts_with("TRN-20260825-"));
        assert_eq!(id.len(), "TRN-20260825-".len() + 10);
    }

    #[test]
    fn test_accrual_id_shape() {
        let id = accrual_tran_id(date());
        assert!(id.starts_with("ACCR-20260825-"));
    }

    #[test]
    fn test_line_id_derivation() {
        let id = line_id("TRN-20260825-1234567001", 3);
        assert_eq!(id, "TRN-20260825-1234567001-3");
    }

    #[test]
    fn test_ids_are_distinct() {
        let ids: HashSet<String> = (0..100).map(|_| posting_tran_id(date())).collect();
        // Same-millisecond collisions are possible but must stay rare.
        assert!(ids.len() > 50);
    }
}
