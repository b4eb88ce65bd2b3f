//! Pure transaction validation.
//!
//! Two independent checks run before any write:
//! - the balance check (debit sum == credit sum, exact, never rounded)
//! - the per-debit account-type policy and sufficiency check
//!
//! Both are side-effect free; collaborator data (GL classification, computed
//! available balance) is resolved by the caller and passed in.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{DrCr, GlClass, LineInput, TransactionTotals};

/// Product-type digit marking an overdraft / credit-line account.
///
/// Account numbers are 12 digits: 8-digit customer id, product-type digit,
/// 3-digit sequence. Product type 5 is Overdraft/CC.
const OVERDRAFT_PRODUCT_TYPE: char = '5';

/// Position of the product-type digit within a customer account number.
const PRODUCT_TYPE_INDEX: usize = 8;

/// Returns true if the account number marks an overdraft / credit-line
/// product, which is allowed to carry a negative balance.
#[must_use]
pub fn is_overdraft_account(account_no: &str) -> bool {
    account_no
        .chars()
        .nth(PRODUCT_TYPE_INDEX)
        .is_some_and(|c| c == OVERDRAFT_PRODUCT_TYPE)
}

/// Validates a set of proposed lines and returns the transaction totals.
///
/// Requires at least two lines, strictly positive local amounts, and exact
/// equality of debit and credit sums. A mismatch is never rounded or
/// rebalanced.
///
/// # Errors
///
/// Returns `LedgerError` on the first violated rule.
pub fn validate_lines(lines: &[LineInput]) -> Result<TransactionTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut debit = Decimal::ZERO;
    let mut credit = Decimal::ZERO;

    for line in lines {
        if line.lcy_amt == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
        if line.lcy_amt < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        match line.dr_cr {
            DrCr::Debit => debit += line.lcy_amt,
            DrCr::Credit => credit += line.lcy_amt,
        }
    }

    let totals = TransactionTotals::new(debit, credit);
    if !totals.is_balanced {
        return Err(LedgerError::Unbalanced { debit, credit });
    }

    Ok(totals)
}

/// Validates a single proposed debit against account-type policy and the
/// computed available balance.
///
/// Policy rules, checked first and always hard failures:
/// - liability accounts must never go below zero;
/// - asset accounts may go below zero only on an overdraft product.
///
/// The sufficiency check (debit must not exceed the available balance) runs
/// after policy; overdraft asset accounts are exempt, since a permitted
/// overdraw is by definition a debit past the available balance.
///
/// # Errors
///
/// Returns `LedgerError` describing the violated rule.
pub fn validate_debit_policy(
    account_no: &str,
    gl_class: Option<GlClass>,
    available: Decimal,
    amount: Decimal,
) -> Result<(), LedgerError> {
    let resulting = available - amount;
    let overdraft_allowed =
        gl_class == Some(GlClass::Asset) && is_overdraft_account(account_no);

    if resulting < Decimal::ZERO {
        match gl_class {
            Some(GlClass::Liability) => {
                return Err(LedgerError::LiabilityOverdraw(account_no.to_string()));
            }
            Some(GlClass::Asset) if !overdraft_allowed => {
                return Err(LedgerError::AssetOverdraw(account_no.to_string()));
            }
            _ => {}
        }
    }

    if amount > available && !overdraft_allowed {
        return Err(LedgerError::InsufficientBalance {
            account_no: account_no.to_string(),
            available,
            requested: amount,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(dr_cr: DrCr, lcy: Decimal) -> LineInput {
        LineInput {
            account_no: "000000011001".to_string(),
            dr_cr,
            tran_ccy: "USD".to_string(),
            fcy_amt: lcy,
            exchange_rate: Decimal::ONE,
            lcy_amt: lcy,
            udf1: None,
        }
    }

    #[test]
    fn test_balanced_lines_accepted() {
        let lines = vec![line(DrCr::Debit, dec!(100.00)), line(DrCr::Credit, dec!(100.00))];
        let totals = validate_lines(&lines).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.debit, dec!(100.00));
        assert_eq!(totals.credit, dec!(100.00));
    }

    #[test]
    fn test_unbalanced_lines_rejected() {
        let lines = vec![line(DrCr::Debit, dec!(100.00)), line(DrCr::Credit, dec!(99.99))];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_multi_leg_balanced() {
        let lines = vec![
            line(DrCr::Debit, dec!(60.00)),
            line(DrCr::Debit, dec!(40.00)),
            line(DrCr::Credit, dec!(100.00)),
        ];
        assert!(validate_lines(&lines).is_ok());
    }

    #[test]
    fn test_single_line_rejected() {
        let lines = vec![line(DrCr::Debit, dec!(100.00))];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::InsufficientLines)
        ));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let lines = vec![line(DrCr::Debit, dec!(0)), line(DrCr::Credit, dec!(0))];
        assert!(matches!(validate_lines(&lines), Err(LedgerError::ZeroAmount)));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let lines = vec![line(DrCr::Debit, dec!(-5.00)), line(DrCr::Credit, dec!(-5.00))];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::NegativeAmount)
        ));
    }

    #[test]
    fn test_overdraft_account_detection() {
        // 9th digit is the product-type code
        assert!(is_overdraft_account("000000015001"));
        assert!(!is_overdraft_account("000000011001"));
        assert!(!is_overdraft_account("short"));
    }

    #[test]
    fn test_liability_debit_to_exactly_zero_succeeds() {
        let result = validate_debit_policy(
            "000000011001",
            Some(GlClass::Liability),
            dec!(100.00),
            dec!(100.00),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_liability_debit_one_cent_below_zero_fails() {
        let result = validate_debit_policy(
            "000000011001",
            Some(GlClass::Liability),
            dec!(100.00),
            dec!(100.01),
        );
        assert!(matches!(result, Err(LedgerError::LiabilityOverdraw(_))));
    }

    #[test]
    fn test_asset_non_overdraft_cannot_go_negative() {
        let result = validate_debit_policy(
            "000000016001",
            Some(GlClass::Asset),
            dec!(50.00),
            dec!(50.01),
        );
        assert!(matches!(result, Err(LedgerError::AssetOverdraw(_))));
    }

    #[test]
    fn test_asset_overdraft_may_go_negative() {
        let result = validate_debit_policy(
            "000000015001",
            Some(GlClass::Asset),
            dec!(50.00),
            dec!(500.00),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_unclassified_gl_insufficient_balance() {
        let result = validate_debit_policy("910101001001", None, dec!(10.00), dec!(10.01));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_sufficient_debit_on_unclassified_gl_passes() {
        assert!(validate_debit_policy("910101001001", None, dec!(10.00), dec!(10.00)).is_ok());
    }
}
