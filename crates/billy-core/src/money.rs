//! # Money Module
//!
//! Provides the `Money` type for Baht amounts on Thai business documents.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On a tax invoice:                                                      │
//! │    VAT-inclusive 107.00 / 1.07 must be exactly 100.00                   │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal, quantized to Satang                     │
//! │    Quantities and rates stay exact, the division stays exact to 28      │
//! │    digits, and rounding happens once, in one place: `round_money`.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billy_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(123456, 2)).unwrap(); // 1,234.56
//! assert_eq!(price.baht(), 1234);
//! assert_eq!(price.satang(), 56);
//! assert_eq!(price.to_string(), "฿1,234.56");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Number of fractional digits kept on every monetary value (Satang).
pub const MONEY_SCALE: u32 = 2;

/// Tie-breaking rule for monetary quantization.
///
/// Round half to even (banker's rounding). Applies to subtotals, tax and
/// the Satang digits read out in words.
pub const MONEY_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Quantizes a decimal to exactly two fractional digits.
///
/// The result always carries scale 2, so `110000` comes back as
/// `110000.00`.
///
/// ## Example
/// ```rust
/// use billy_core::money::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(110000, 0)).to_string(), "110000.00");
/// assert_eq!(round_money(Decimal::new(1005, 3)).to_string(), "1.00"); // tie → even
/// assert_eq!(round_money(Decimal::new(1015, 3)).to_string(), "1.02"); // tie → even
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, MONEY_ROUNDING);
    rounded.rescale(MONEY_SCALE);
    rounded
}

// =============================================================================
// Money Type
// =============================================================================

/// A non-negative Baht amount with exactly two fractional digits.
///
/// ## Invariants
/// - never negative (constructor rejects it)
/// - always quantized with [`round_money`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value, quantizing to Satang.
    ///
    /// ## Errors
    /// `CoreError::NegativeAmount` when `value < 0`.
    pub fn new(value: Decimal) -> Result<Self, CoreError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(CoreError::NegativeAmount);
        }
        Ok(Money(round_money(value)))
    }

    /// Zero Baht.
    #[inline]
    pub fn zero() -> Self {
        Money(round_money(Decimal::ZERO))
    }

    /// The underlying decimal (scale 2).
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Whole Baht.
    pub fn baht(&self) -> u128 {
        self.0.trunc().to_u128().unwrap_or_default()
    }

    /// Satang part, always 0-99.
    pub fn satang(&self) -> u32 {
        ((self.0 - self.0.trunc()) * Decimal::ONE_HUNDRED)
            .to_u32()
            .unwrap_or_default()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Sum of two amounts, `None` when it leaves the decimal range.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(|sum| Money(round_money(sum)))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = CoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Renders `฿1,234.56`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.baht().to_string();
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "฿{}.{:02}", grouped, self.satang())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_always_scale_two() {
        assert_eq!(round_money(dec!(7700)).to_string(), "7700.00");
        assert_eq!(round_money(dec!(0.5)).to_string(), "0.50");
        assert_eq!(round_money(dec!(12.345678)).to_string(), "12.35");
    }

    #[test]
    fn test_round_money_ties_to_even() {
        assert_eq!(round_money(dec!(0.125)), dec!(0.12));
        assert_eq!(round_money(dec!(0.135)), dec!(0.14));
        assert_eq!(round_money(dec!(2.675)), dec!(2.68));
        // not a tie
        assert_eq!(round_money(dec!(0.1251)), dec!(0.13));
    }

    #[test]
    fn test_new_rejects_negative() {
        assert_eq!(Money::new(dec!(-0.01)), Err(CoreError::NegativeAmount));
        assert!(Money::new(dec!(0)).is_ok());
        // -0 is zero, not negative
        assert!(Money::new(dec!(-0.00)).is_ok());
    }

    #[test]
    fn test_baht_and_satang() {
        let money = Money::new(dec!(1234.56)).unwrap();
        assert_eq!(money.baht(), 1234);
        assert_eq!(money.satang(), 56);

        let carried = Money::new(dec!(99.999)).unwrap();
        assert_eq!(carried.baht(), 100);
        assert_eq!(carried.satang(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec!(0)).unwrap().to_string(), "฿0.00");
        assert_eq!(Money::new(dec!(999)).unwrap().to_string(), "฿999.00");
        assert_eq!(Money::new(dec!(1000)).unwrap().to_string(), "฿1,000.00");
        assert_eq!(
            Money::new(dec!(117700)).unwrap().to_string(),
            "฿117,700.00"
        );
        assert_eq!(
            Money::new(dec!(1234567.8)).unwrap().to_string(),
            "฿1,234,567.80"
        );
    }

    #[test]
    fn test_checked_add() {
        let a = Money::new(dec!(10.10)).unwrap();
        let b = Money::new(dec!(0.25)).unwrap();
        let sum = a.checked_add(b).unwrap();
        assert_eq!(sum.amount().to_string(), "10.35");

        let huge = Money(Decimal::MAX);
        assert_eq!(huge.checked_add(huge), None);
    }

    #[test]
    fn test_serde_rejects_negative() {
        let ok: Money = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(ok.amount().to_string(), "12.50");
        assert!(serde_json::from_str::<Money>("\"-1\"").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"12.50\"");
    }
}
