//! Price type for whole-Rand amounts.
//!
//! The storefront lists every product in whole Rand, so prices are plain
//! non-negative integers with no minor units and no currency field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Display symbol for the storefront currency.
pub const CURRENCY_SYMBOL: &str = "R";

/// ISO 4217 code reported to analytics.
pub const CURRENCY_CODE: &str = "ZAR";

/// A non-negative amount in whole Rand.
///
/// Arithmetic saturates at `u64::MAX` instead of overflowing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero Rand.
    pub const ZERO: Price = Price(0);

    /// Create a price from whole Rand.
    pub const fn new(rand: u64) -> Self {
        Self(rand)
    }

    /// Amount in whole Rand.
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Check if this is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a price label as shown on the page (e.g. `"R45"`).
    ///
    /// Every character that is not an ASCII digit is discarded and the
    /// remaining digits are read as one number. A label without digits, or
    /// whose digits do not fit in a `u64`, yields [`Price::ZERO`]. This never
    /// fails.
    ///
    /// The blunt stripping means ranges and decimals are *not* understood:
    ///
    /// ```
    /// use sweetbites_cart::Price;
    ///
    /// assert_eq!(Price::parse_label("R45"), Price::new(45));
    /// assert_eq!(Price::parse_label("R 1 200"), Price::new(1200));
    /// assert_eq!(Price::parse_label("R45 - R60"), Price::new(4560));
    /// assert_eq!(Price::parse_label("R12.50"), Price::new(1250));
    /// assert_eq!(Price::parse_label("Ask us"), Price::ZERO);
    /// ```
    pub fn parse_label(label: &str) -> Self {
        let digits: String = label.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Self::ZERO;
        }
        digits.parse().map(Self).unwrap_or(Self::ZERO)
    }

    /// Total for `quantity` units at this price.
    pub fn line_total(&self, quantity: u32) -> Price {
        Price(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Add another price, saturating at the maximum.
    pub fn saturating_add(self, other: Price) -> Price {
        Price(self.0.saturating_add(other.0))
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, other: Price) -> Price {
        self.saturating_add(other)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Price::saturating_add)
    }
}

impl From<u64> for Price {
    fn from(rand: u64) -> Self {
        Self(rand)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CURRENCY_SYMBOL, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_label() {
        assert_eq!(Price::parse_label("R45"), Price::new(45));
        assert_eq!(Price::parse_label("45"), Price::new(45));
        assert_eq!(Price::parse_label("  R350 "), Price::new(350));
    }

    #[test]
    fn test_parse_without_digits_is_zero() {
        assert_eq!(Price::parse_label(""), Price::ZERO);
        assert_eq!(Price::parse_label("R"), Price::ZERO);
        assert_eq!(Price::parse_label("Free"), Price::ZERO);
        assert_eq!(Price::parse_label("R-"), Price::ZERO);
    }

    #[test]
    fn test_parse_is_idempotent() {
        for label in ["R45", "R12.50", "R45 - R60", "nothing", "R 9"] {
            assert_eq!(Price::parse_label(label), Price::parse_label(label));
        }
    }

    #[test]
    fn test_parse_range_label_concatenates_digits() {
        // Multi-price labels are mis-read on purpose: every digit is kept.
        assert_eq!(Price::parse_label("R45 - R60"), Price::new(4560));
    }

    #[test]
    fn test_parse_decimal_label_drops_separator() {
        assert_eq!(Price::parse_label("R12.50"), Price::new(1250));
        assert_eq!(Price::parse_label("R1,200"), Price::new(1200));
    }

    #[test]
    fn test_parse_negative_sign_is_ignored() {
        assert_eq!(Price::parse_label("-R30"), Price::new(30));
    }

    #[test]
    fn test_parse_overflow_is_zero() {
        let huge = "9".repeat(40);
        assert_eq!(Price::parse_label(&huge), Price::ZERO);
    }

    #[test]
    fn test_parse_non_ascii_digits_ignored() {
        // Arabic-Indic digits are not ASCII digits.
        assert_eq!(Price::parse_label("R\u{0664}\u{0665}"), Price::ZERO);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(Price::new(45).line_total(2), Price::new(90));
        assert_eq!(Price::new(45).line_total(0), Price::ZERO);
        assert_eq!(Price::new(u64::MAX).line_total(2), Price::new(u64::MAX));
    }

    #[test]
    fn test_sum_saturates() {
        let total: Price = [Price::new(u64::MAX), Price::new(1)].into_iter().sum();
        assert_eq!(total, Price::new(u64::MAX));

        let total: Price = [Price::new(10), Price::new(35)].into_iter().sum();
        assert_eq!(total, Price::new(45));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(45).to_string(), "R45");
        assert_eq!(Price::ZERO.to_string(), "R0");
    }
}
