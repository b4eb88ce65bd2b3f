//! Integration tests for the interest accrual batch engine.

mod common;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use corebank_db::entities::sea_orm_active_enums::{AccrualStatus, DrCrFlag, SubProductStatus};
use corebank_db::entities::{account_accruals, accrual_gl_movements, accrual_trans};
use corebank_db::repositories::AccrualRepository;
use corebank_shared::config::AccrualConfig;

/// Creates an interest-bearing liability account with the given balance
/// and annual rate.
async fn deposit_account(
    db: &sea_orm::DatabaseConnection,
    balance: Decimal,
    rate: Option<Decimal>,
) -> String {
    let gl_num = format!("1{}", common::unique_digits(8));
    common::create_gl(db, &gl_num).await;
    let sp = common::create_sub_product(db, &gl_num, rate, SubProductStatus::Active).await;
    let account_no = format!("{}1{}", common::unique_digits(8), common::unique_digits(3));
    common::create_account(db, &account_no, &gl_num, sp, balance).await;
    account_no
}

/// Accrual rows for one account on one date. Batches enumerate every active
/// account, so suites running in parallel see each other's fixtures; keying
/// assertions on the test's own date keeps them disjoint.
async fn accrual_rows(
    db: &sea_orm::DatabaseConnection,
    account_no: &str,
    date: NaiveDate,
) -> Vec<account_accruals::Model> {
    account_accruals::Entity::find()
        .filter(account_accruals::Column::AccountNo.eq(account_no))
        .filter(account_accruals::Column::AccrualDate.eq(date))
        .all(db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_reference_balance_accrues_one_thirty_seven() {
    let Some(db) = common::try_db().await else {
        eprintln!("skipping: database unavailable");
        return;
    };
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();

    // 10000.00 at 5% annual: one day's interest is 1.37.
    let account_no = deposit_account(&db, dec!(10000.00), Some(dec!(0.0500))).await;

    let repo = AccrualRepository::new(db.clone(), AccrualConfig::default());
    let outcome = repo.run_accrual_batch(date).await.unwrap();
    assert!(outcome.processed >= 1);
    assert_eq!(outcome.accrual_date, date);

    let rows = accrual_rows(&db, &account_no, date).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].interest_amount, dec!(1.37));

    // The accrual transaction is created directly in Verified with two GL
    // legs: debit expense, credit payable, both for the interest amount.
    let tran = accrual_trans::Entity::find()
        .filter(accrual_trans::Column::AccountNo.eq(&account_no))
        .filter(accrual_trans::Column::AccrualDate.eq(date))
        .one(&db)
        .await
        .unwrap()
        .expect("accrual transaction must exist");
    assert_eq!(tran.status, AccrualStatus::Verified);
    assert_eq!(tran.amount, dec!(1.37));
    assert_eq!(tran.interest_rate, dec!(0.0500));
    assert!(tran.tran_id.starts_with("ACCR-"));

    let legs = accrual_gl_movements::Entity::find()
        .filter(accrual_gl_movements::Column::AccrId.eq(tran.accr_id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(legs.len(), 2);
    let config = AccrualConfig::default();
    let debit = legs.iter().find(|l| l.dr_cr_flag == DrCrFlag::Debit).unwrap();
    let credit = legs.iter().find(|l| l.dr_cr_flag == DrCrFlag::Credit).unwrap();
    assert_eq!(debit.gl_num, config.interest_expense_gl);
    assert_eq!(credit.gl_num, config.interest_payable_gl);
    assert_eq!(debit.amount, dec!(1.37));
    assert_eq!(credit.amount, dec!(1.37));
}

#[tokio::test]
async fn test_zero_balance_and_rateless_accounts_are_skipped() {
    let Some(db) = common::try_db().await else {
        eprintln!("skipping: database unavailable");
        return;
    };
    let date = NaiveDate::from_ymd_opt(2026, 2, 6).unwrap();

    let zero_balance = deposit_account(&db, Decimal::ZERO, Some(dec!(0.0500))).await;
    let no_rate = deposit_account(&db, dec!(5000.00), None).await;
    let zero_rate = deposit_account(&db, dec!(5000.00), Some(Decimal::ZERO)).await;

    let repo = AccrualRepository::new(db.clone(), AccrualConfig::default());
    let outcome = repo.run_accrual_batch(date).await.unwrap();

    for account_no in [&zero_balance, &no_rate, &zero_rate] {
        assert!(
            accrual_rows(&db, account_no, date).await.is_empty(),
            "account {account_no} must be skipped"
        );
        assert!(
            !outcome.errors.iter().any(|e| &e.account_no == account_no),
            "a skip is not an error"
        );
    }
}

#[tokio::test]
async fn test_one_account_failure_does_not_abort_the_batch() {
    let Some(db) = common::try_db().await else {
        eprintln!("skipping: database unavailable");
        return;
    };
    let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();

    let healthy = deposit_account(&db, dec!(2000.00), Some(dec!(0.0365))).await;

    // An interest-bearing account with no balance row fails its own unit.
    let gl_num = format!("1{}", common::unique_digits(8));
    common::create_gl(&db, &gl_num).await;
    let sp =
        common::create_sub_product(&db, &gl_num, Some(dec!(0.0365)), SubProductStatus::Active)
            .await;
    let broken = format!("{}1{}", common::unique_digits(8), common::unique_digits(3));
    common::create_account_without_balance(&db, &broken, &gl_num, sp).await;

    let repo = AccrualRepository::new(db.clone(), AccrualConfig::default());
    let outcome = repo.run_accrual_batch(date).await.unwrap();

    // The broken account is reported, the healthy one is committed.
    assert!(outcome.errors.iter().any(|e| e.account_no == broken));
    assert!(!outcome.is_complete());

    let rows = accrual_rows(&db, &healthy, date).await;
    assert_eq!(rows.len(), 1);
    // 2000.00 * 0.0365 / 365 = 0.20
    assert_eq!(rows[0].interest_amount, dec!(0.20));
    assert!(accrual_rows(&db, &broken, date).await.is_empty());
}
