//! Currency values with exactly 2 decimal places.
//!
//! Decoded amounts are kept as raw `f64` through aggregation; they are only
//! rounded here, when a total is turned into something to print.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// A currency value rounded to 2 decimal places.
///
/// # Examples
///
/// ```
/// use mps7_summary::Money;
///
/// let amount = Money::from_f64(10.5).unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Creates a `Money` from a `Decimal`, rounding half away from zero.
    pub fn new(value: Decimal) -> Self {
        let mut rounded =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(Self::SCALE);
        Money(rounded)
    }

    /// Converts an accumulated `f64` total.
    ///
    /// Fails for NaN, infinities and magnitudes beyond the range of `Decimal`.
    pub fn from_f64(value: f64) -> Result<Self, rust_decimal::Error> {
        Decimal::try_from(value).map(Money::new)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_keeps_two_places() {
        assert_eq!(Money::from_f64(1.0).unwrap().to_string(), "1.00");
        assert_eq!(Money::from_f64(604.27).unwrap().to_string(), "604.27");
        assert_eq!(Money::from_f64(0.0).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(Money::new(Decimal::new(1005, 3)).to_string(), "1.01");
        assert_eq!(Money::new(Decimal::new(-1005, 3)).to_string(), "-1.01");
        assert_eq!(Money::new(Decimal::new(1004, 3)).to_string(), "1.00");
    }

    #[test]
    fn test_large_whole_values() {
        assert_eq!(Money::from_f64(1_234_567.0).unwrap().to_string(), "1234567.00");
        assert_eq!(Money::from_f64(-9_876_543.219).unwrap().to_string(), "-9876543.22");
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Money::from_f64(f64::NAN).is_err());
        assert!(Money::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_beyond_decimal_range() {
        assert!(Money::from_f64(1e29).is_err());
    }
}
