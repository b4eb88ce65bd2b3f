//! Account-number sequence scopes and formatting.
//!
//! Counters are maintained per scope: customer+product-type pairs for
//! customer account numbers (3-digit sequence, ceiling 999) and GL numbers
//! for office-account serials (2-digit, ceiling 99). Allocation itself is a
//! locked database operation; this module owns the pure parts: scope keys,
//! ceilings, and the zero-padded presentation of allocated values.

use std::fmt;

/// A key space under which one monotonic counter is maintained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SequenceScope {
    /// Per customer and product type; feeds the 3-digit account sequence.
    CustomerProduct {
        /// Primary customer id (8 digits).
        cust_id: i64,
        /// Product-type digit (1-6).
        product_type: char,
    },
    /// Per GL; feeds the 2-digit office-account serial.
    OfficeGl {
        /// The 9-digit GL number.
        gl_num: String,
    },
}

impl SequenceScope {
    /// Stable storage key for this scope.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::CustomerProduct {
                cust_id,
                product_type,
            } => format!("CUST-{cust_id:08}-{product_type}"),
            Self::OfficeGl { gl_num } => format!("GL-{gl_num}"),
        }
    }

    /// Digit width of the formatted sequence.
    #[must_use]
    pub const fn width(&self) -> usize {
        match self {
            Self::CustomerProduct { .. } => 3,
            Self::OfficeGl { .. } => 2,
        }
    }

    /// Largest value this scope can ever allocate. Reaching it is terminal
    /// for the scope until an operator resets the counter.
    #[must_use]
    pub const fn max(&self) -> i32 {
        match self {
            Self::CustomerProduct { .. } => 999,
            Self::OfficeGl { .. } => 99,
        }
    }

    /// Formats an allocated value with the scope's zero padding.
    #[must_use]
    pub fn format_seq(&self, seq: i32) -> String {
        let width = self.width();
        format!("{seq:0width$}")
    }
}

impl fmt::Display for SequenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Composes a 12-digit customer account number:
/// 8-digit customer id + product-type digit + 3-digit sequence.
#[must_use]
pub fn customer_account_number(cust_id: i64, product_type: char, seq: i32) -> String {
    format!("{cust_id:08}{product_type}{seq:03}")
}

/// Composes a 12-digit office account number:
/// `9` + 9-digit GL number + 2-digit serial.
#[must_use]
pub fn office_account_number(gl_num: &str, seq: i32) -> String {
    format!("9{gl_num}{seq:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_scope_keys_are_disjoint() {
        let a = SequenceScope::CustomerProduct {
            cust_id: 42,
            product_type: '1',
        };
        let b = SequenceScope::CustomerProduct {
            cust_id: 42,
            product_type: '2',
        };
        let c = SequenceScope::OfficeGl {
            gl_num: "110101000".to_string(),
        };
        assert_eq!(a.key(), "CUST-00000042-1");
        assert_ne!(a.key(), b.key());
        assert_eq!(c.key(), "GL-110101000");
    }

    #[rstest]
    #[case(SequenceScope::CustomerProduct { cust_id: 1, product_type: '1' }, 999, 3)]
    #[case(SequenceScope::OfficeGl { gl_num: "110101000".into() }, 99, 2)]
    fn test_scope_ceilings(#[case] scope: SequenceScope, #[case] max: i32, #[case] width: usize) {
        assert_eq!(scope.max(), max);
        assert_eq!(scope.width(), width);
    }

    #[test]
    fn test_format_seq_pads() {
        let scope = SequenceScope::CustomerProduct {
            cust_id: 1,
            product_type: '1',
        };
        assert_eq!(scope.format_seq(7), "007");
        let office = SequenceScope::OfficeGl {
            gl_num: "110101000".into(),
        };
        assert_eq!(office.format_seq(7), "07");
    }

    #[test]
    fn test_customer_account_number_layout() {
        let acct = customer_account_number(12345678, '1', 1);
        assert_eq!(acct, "123456781001");
        assert_eq!(acct.len(), 12);
    }

    #[test]
    fn test_office_account_number_layout() {
        let acct = office_account_number("110101000", 7);
        assert_eq!(acct, "911010100007");
        assert_eq!(acct.len(), 12);
    }
}
