//! Order pricing.
//!
//! All arithmetic runs on `rust_decimal::Decimal`; wire amounts arrive as
//! `f64` and are converted once at the boundary. Results are rounded to two
//! places, midpoint away from zero, so repeated recomputation never drifts.

use std::fmt;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Monetary values carry two decimal places.
const DECIMAL_PLACES: u32 = 2;

/// Round to 2 dp, half-up.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a wire amount to `Decimal`, rounded to cents.
pub fn to_decimal(value: f64) -> Decimal {
    round2(Decimal::from_f64(value).unwrap_or_default())
}

/// Convert back to `f64` for the wire.
pub fn to_f64(value: Decimal) -> f64 {
    round2(value).to_f64().unwrap_or_default()
}

// ── DiscountMultiplier ───────────────────────────────────────────────

/// Fraction of the base price the customer pays, always in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountMultiplier(Decimal);

impl DiscountMultiplier {
    /// No discount.
    pub const FULL_PRICE: Self = Self(Decimal::ONE);

    /// `None` unless `0 < value <= 1`.
    pub fn new(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO && value <= Decimal::ONE).then_some(Self(value))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn is_discounted(self) -> bool {
        self.0 < Decimal::ONE
    }

    /// Percentage taken off, e.g. `20` for a 0.8 multiplier.
    pub fn percent_off(self) -> Decimal {
        ((Decimal::ONE - self.0) * Decimal::ONE_HUNDRED).normalize()
    }
}

impl Default for DiscountMultiplier {
    fn default() -> Self {
        Self::FULL_PRICE
    }
}

impl TryFrom<Decimal> for DiscountMultiplier {
    type Error = String;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("discount multiplier {value} is outside (0, 1]"))
    }
}

impl From<DiscountMultiplier> for Decimal {
    fn from(m: DiscountMultiplier) -> Self {
        m.0
    }
}

impl fmt::Display for DiscountMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// ── PriceBreakdown ───────────────────────────────────────────────────

/// Result of pricing a plan under a multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub original_amount: Decimal,
    pub final_amount: Decimal,
    pub discount_amount: Decimal,
}

/// Price `base` under `multiplier`.
///
/// `final = round2(base * m)`, `discount = round2(base - base * m)`.
/// Pure: identical inputs always give identical output.
pub fn compute_total(base: Decimal, multiplier: DiscountMultiplier) -> PriceBreakdown {
    let discounted = base * multiplier.value();
    PriceBreakdown {
        original_amount: round2(base),
        final_amount: round2(discounted),
        discount_amount: round2(base - discounted),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn multiplier(s: &str) -> DiscountMultiplier {
        DiscountMultiplier::new(dec(s)).unwrap()
    }

    #[test]
    fn eighty_percent_of_hundred() {
        let b = compute_total(dec("100"), multiplier("0.8"));
        assert_eq!(b.final_amount, dec("80.00"));
        assert_eq!(b.discount_amount, dec("20.00"));
        assert_eq!(b.original_amount, dec("100"));
    }

    #[test]
    fn full_price_has_zero_discount() {
        for price in ["29.9", "49.9", "99.9", "279.9", "0.01", "0"] {
            let b = compute_total(dec(price), DiscountMultiplier::FULL_PRICE);
            assert_eq!(b.discount_amount, Decimal::ZERO, "price {price}");
            assert_eq!(b.final_amount, dec(price));
        }
    }

    #[test]
    fn rounds_half_up_to_cents() {
        // 49.9 * 0.9 = 44.91 exactly; 29.9 * 0.5 = 14.95 exactly
        assert_eq!(
            compute_total(dec("49.9"), multiplier("0.9")).final_amount,
            dec("44.91")
        );
        // 0.125 rounds up, not to even
        assert_eq!(round2(dec("0.125")), dec("0.13"));
        assert_eq!(round2(dec("-0.125")), dec("-0.13"));
        // 139.9 * 0.8 = 111.92
        let b = compute_total(dec("139.9"), multiplier("0.8"));
        assert_eq!(b.final_amount + b.discount_amount, dec("139.90"));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let m = multiplier("0.9");
        let first = compute_total(dec("279.9"), m);
        let second = compute_total(dec("279.9"), m);
        assert_eq!(first, second);
        assert_eq!(first.final_amount.to_string(), second.final_amount.to_string());
    }

    #[test]
    fn multiplier_bounds() {
        assert!(DiscountMultiplier::new(Decimal::ZERO).is_none());
        assert!(DiscountMultiplier::new(dec("1.01")).is_none());
        assert!(DiscountMultiplier::new(dec("-0.5")).is_none());
        assert!(DiscountMultiplier::new(Decimal::ONE).is_some());
        assert_eq!(multiplier("0.8").percent_off(), dec("20"));
        assert!(!DiscountMultiplier::default().is_discounted());
    }

    #[test]
    fn multiplier_deserialization_enforces_range() {
        let ok: DiscountMultiplier = serde_json::from_str("\"0.5\"").unwrap();
        assert_eq!(ok.value(), dec("0.5"));
        assert!(serde_json::from_str::<DiscountMultiplier>("\"1.5\"").is_err());
    }

    #[test]
    fn wire_conversion_rounds_to_cents() {
        assert_eq!(to_decimal(29.9), dec("29.90"));
        assert_eq!(to_decimal(0.1 + 0.2), dec("0.30"));
        assert!((to_f64(dec("44.905")) - 44.91).abs() < 1e-9);
    }
}
