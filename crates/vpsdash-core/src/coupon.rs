// ── Coupon resolution ──
//
// Codes are matched exactly after trimming and upper-casing. There is no
// expiry, usage cap, or per-user restriction.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::pricing::DiscountMultiplier;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    #[error("Please enter a coupon code")]
    EmptyCode,

    #[error("Invalid coupon code: {code}")]
    Invalid { code: String },
}

/// A single table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coupon {
    pub code: String,
    pub multiplier: DiscountMultiplier,
}

impl Coupon {
    pub fn new(code: &str, multiplier: DiscountMultiplier) -> Self {
        Self {
            code: normalize(code),
            multiplier,
        }
    }
}

/// Trim and upper-case a user-entered code.
pub fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Fixed lookup table of coupon codes.
#[derive(Debug, Clone)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// `WELCOME10` (10% off), `VIP20` (20% off), `SPECIAL50` (50% off).
    pub fn standard() -> Self {
        let entry = |code: &str, tenths: i64| {
            Coupon::new(
                code,
                DiscountMultiplier::new(Decimal::new(tenths, 1))
                    .unwrap_or(DiscountMultiplier::FULL_PRICE),
            )
        };
        Self::new(vec![
            entry("WELCOME10", 9),
            entry("VIP20", 8),
            entry("SPECIAL50", 5),
        ])
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Look up `code`; see [`CouponError`] for the two failure cases.
    pub fn resolve(&self, code: &str) -> Result<DiscountMultiplier, CouponError> {
        let code = normalize(code);
        if code.is_empty() {
            return Err(CouponError::EmptyCode);
        }
        self.coupons
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.multiplier)
            .ok_or(CouponError::Invalid { code })
    }
}

impl Default for CouponBook {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn standard_codes_resolve() {
        let book = CouponBook::standard();
        assert_eq!(book.resolve("WELCOME10").unwrap().value(), Decimal::new(9, 1));
        assert_eq!(book.resolve("VIP20").unwrap().value(), Decimal::new(8, 1));
        assert_eq!(book.resolve("SPECIAL50").unwrap().value(), Decimal::new(5, 1));
    }

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        let book = CouponBook::standard();
        assert_eq!(
            book.resolve("  vip20 ").unwrap(),
            book.resolve("VIP20").unwrap()
        );
    }

    #[test]
    fn empty_and_unknown_codes_fail_differently() {
        let book = CouponBook::standard();
        assert_eq!(book.resolve("   "), Err(CouponError::EmptyCode));
        assert_eq!(
            book.resolve("vip2"),
            Err(CouponError::Invalid {
                code: "VIP2".into()
            })
        );
        assert!(matches!(
            book.resolve("WELCOME100"),
            Err(CouponError::Invalid { .. })
        ));
    }
}
