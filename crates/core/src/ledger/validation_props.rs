//! Property-based tests for transaction validation rules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{DrCr, GlClass, LineInput};
use super::validation::{validate_debit_policy, validate_lines};

/// Strategy to generate a positive local-currency amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a debit/credit flag.
fn dr_cr_strategy() -> impl Strategy<Value = DrCr> {
    prop_oneof![Just(DrCr::Debit), Just(DrCr::Credit)]
}

fn make_line(dr_cr: DrCr, lcy_amt: Decimal) -> LineInput {
    LineInput {
        account_no: "000000011001".to_string(),
        dr_cr,
        tran_ccy: "USD".to_string(),
        fcy_amt: lcy_amt,
        exchange_rate: Decimal::ONE,
        lcy_amt,
        udf1: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any positive amount, a mirrored debit/credit pair validates and
    /// its totals are exactly equal.
    #[test]
    fn prop_mirrored_pair_balances(amount in positive_amount()) {
        let lines = vec![make_line(DrCr::Debit, amount), make_line(DrCr::Credit, amount)];
        let totals = validate_lines(&lines).unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debit, amount);
        prop_assert_eq!(totals.credit, amount);
    }

    /// For any two distinct positive amounts, the validator rejects the pair
    /// with the exact sums in the error.
    #[test]
    fn prop_mismatch_rejected(a in positive_amount(), b in positive_amount()) {
        prop_assume!(a != b);
        let lines = vec![make_line(DrCr::Debit, a), make_line(DrCr::Credit, b)];
        match validate_lines(&lines) {
            Err(LedgerError::Unbalanced { debit, credit }) => {
                prop_assert_eq!(debit, a);
                prop_assert_eq!(credit, b);
            }
            other => prop_assert!(false, "expected Unbalanced, got {:?}", other.map(|_| ())),
        }
    }

    /// Splitting one side across several lines never changes the verdict.
    #[test]
    fn prop_split_side_still_balances(a in positive_amount(), b in positive_amount()) {
        let lines = vec![
            make_line(DrCr::Debit, a),
            make_line(DrCr::Debit, b),
            make_line(DrCr::Credit, a + b),
        ];
        prop_assert!(validate_lines(&lines).is_ok());
    }

    /// A liability account may always be debited down to exactly zero and
    /// never past it.
    #[test]
    fn prop_liability_floor_is_zero(available in positive_amount(), extra in positive_amount()) {
        let to_zero =
            validate_debit_policy("000000011001", Some(GlClass::Liability), available, available);
        prop_assert!(to_zero.is_ok());

        let past_zero = validate_debit_policy(
            "000000011001",
            Some(GlClass::Liability),
            available,
            available + extra,
        );
        prop_assert!(matches!(past_zero, Err(LedgerError::LiabilityOverdraw(_))));
    }

    /// Overdraft asset accounts accept any debit amount.
    #[test]
    fn prop_overdraft_asset_unbounded(available in positive_amount(), amount in positive_amount()) {
        let result =
            validate_debit_policy("000000015001", Some(GlClass::Asset), available, amount);
        prop_assert!(result.is_ok());
    }

    /// A single line can never form a valid transaction.
    #[test]
    fn prop_single_line_always_rejected(dr_cr in dr_cr_strategy(), amount in positive_amount()) {
        let lines = vec![make_line(dr_cr, amount)];
        prop_assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::InsufficientLines)
        ));
    }
}
