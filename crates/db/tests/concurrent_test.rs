//! Concurrent access tests for the balance store and sequence allocator.
//!
//! Uses a barrier to release contenders at once, then checks the
//! conservation properties: no update is lost and no sequence value is
//! handed out twice, whatever the interleaving.

mod common;

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Barrier;

use corebank_core::ledger::{DrCr, LineInput, TransactionInput};
use corebank_core::sequence::SequenceScope;
use corebank_db::repositories::{BalanceRepository, PostingRepository, SequenceRepository};

fn transfer(from: &str, to: &str, amount: Decimal) -> TransactionInput {
    let line = |account_no: &str, dr_cr| LineInput {
        account_no: account_no.to_string(),
        dr_cr,
        tran_ccy: "USD".to_string(),
        fcy_amt: amount,
        exchange_rate: Decimal::ONE,
        lcy_amt: amount,
        udf1: None,
    };
    TransactionInput {
        value_date: Utc::now().date_naive(),
        narration: "concurrent transfer".to_string(),
        lines: vec![line(from, DrCr::Debit), line(to, DrCr::Credit)],
    }
}

#[tokio::test]
async fn test_concurrent_transfers_lose_no_updates() {
    let Some(db) = common::try_db().await else {
        eprintln!("skipping: database unavailable");
        return;
    };

    const TASKS: usize = 6;
    const AMOUNT: Decimal = dec!(10.00);

    let from = common::liability_account(&db, dec!(10000.00)).await;
    let to = common::liability_account(&db, Decimal::ZERO).await;

    let barrier = Arc::new(Barrier::new(TASKS));
    let mut handles = Vec::with_capacity(TASKS);
    for _ in 0..TASKS {
        let db = db.clone();
        let barrier = Arc::clone(&barrier);
        let input = transfer(&from.account_no, &to.account_no, AMOUNT);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            PostingRepository::new(db).post(&input).await
        }));
    }

    let results = join_all(handles).await;
    let successes = results
        .into_iter()
        .filter(|r| matches!(r, Ok(Ok(_))))
        .count();
    assert!(successes >= 1, "at least one transfer must get through");

    // Conservation: exactly `successes * AMOUNT` moved, none lost, none
    // double-applied.
    let moved = AMOUNT * Decimal::from(successes as u64);
    let balances = BalanceRepository::new(db.clone());
    assert_eq!(
        balances.account_balance(&from.account_no).await.unwrap(),
        dec!(10000.00) - moved
    );
    assert_eq!(
        balances.account_balance(&to.account_no).await.unwrap(),
        moved
    );
}

#[tokio::test]
async fn test_concurrent_sequence_allocations_are_distinct() {
    let Some(db) = common::try_db().await else {
        eprintln!("skipping: database unavailable");
        return;
    };

    const TASKS: usize = 8;

    let cust_id: i64 = common::unique_digits(8).parse().unwrap();
    let scope = SequenceScope::CustomerProduct {
        cust_id,
        product_type: '1',
    };

    let barrier = Arc::new(Barrier::new(TASKS));
    let mut handles = Vec::with_capacity(TASKS);
    for _ in 0..TASKS {
        let db = db.clone();
        let barrier = Arc::clone(&barrier);
        let scope = scope.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            SequenceRepository::new(db).next(&scope).await
        }));
    }

    let mut values: Vec<i32> = join_all(handles)
        .await
        .into_iter()
        .filter_map(|r| r.ok().and_then(Result::ok))
        .collect();
    assert!(!values.is_empty(), "at least one allocation must succeed");

    values.sort_unstable();
    let mut deduped = values.clone();
    deduped.dedup();
    assert_eq!(values, deduped, "no value may be handed out twice");

    // Every successful allocation is accounted for: the counter ends at
    // the highest value handed out.
    let top = *values.last().unwrap();
    assert_eq!(values.len(), top as usize);
}
