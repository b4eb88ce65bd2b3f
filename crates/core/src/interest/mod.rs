//! Daily interest accrual arithmetic.
//!
//! Simple daily interest over a 365-day year: the annual rate is stored as a
//! fraction (0.0500 for 5%), and each run accrues one day's worth against the
//! account's current balance. All arithmetic is `Decimal`; results are
//! rounded half-up to 2 fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};

/// Days in the interest year.
const DAYS_IN_YEAR: u32 = 365;

/// Computes one day's interest for a balance at an annual rate.
///
/// `interest = balance * rate / 365`, rounded half-up to 2 fractional
/// digits. A negative balance yields a negative accrual; the caller decides
/// whether to skip zero balances before calling.
#[must_use]
pub fn daily_accrual(balance: Decimal, annual_rate: Decimal) -> Decimal {
    (balance * annual_rate / Decimal::from(DAYS_IN_YEAR))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_accrual() {
        // 10000.00 at 5% annual: 10000 * 0.05 / 365 = 1.3698... -> 1.37
        assert_eq!(daily_accrual(dec!(10000.00), dec!(0.0500)), dec!(1.37));
    }

    #[test]
    fn test_rounds_half_up_not_bankers() {
        // 36.50 * 0.05 / 365 = 0.005 exactly; half-up gives 0.01.
        assert_eq!(daily_accrual(dec!(36.50), dec!(0.0500)), dec!(0.01));
    }

    #[test]
    fn test_zero_rate_accrues_nothing() {
        assert_eq!(daily_accrual(dec!(10000.00), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_negative_balance_accrues_negative() {
        assert_eq!(daily_accrual(dec!(-10000.00), dec!(0.0500)), dec!(-1.37));
    }

    #[test]
    fn test_four_digit_rates_do_not_drift() {
        // 365 daily accruals at a 4dp rate stay within a cent of the
        // undayed annual figure.
        let balance = dec!(25000.00);
        let rate = dec!(0.0425);
        let daily = daily_accrual(balance, rate);
        let year: Decimal = daily * Decimal::from(365);
        let annual = (balance * rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert!((year - annual).abs() <= dec!(1.83)); // 365 * half-cent bound
    }

    #[test]
    fn test_small_balance_rounds_to_zero() {
        // 1.00 * 0.05 / 365 = 0.000136... -> 0.00
        assert_eq!(daily_accrual(dec!(1.00), dec!(0.0500)), Decimal::ZERO);
    }
}
