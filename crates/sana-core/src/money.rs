//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Integer Money, Decimal Factors
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE EACH REPRESENTATION LIVES                                        │
//! │                                                                         │
//! │  Base price (config)     Money  15000 minor units = 150.00             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Pricing formula         Decimal 150 × 1.5 × 3 × 0.9 = 607.5 (exact)   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Display boundary        Money  60750 minor units = 607.50             │
//! │                                                                         │
//! │  Markups and discounts are decimal factors, so the exact total is a    │
//! │  Decimal. It only becomes Money when rounded for display.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sana_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_minor(15050);
//! assert_eq!(price.to_string(), "150.50");
//!
//! // Config files carry decimal strings
//! let parsed: Money = "150.5".parse().unwrap();
//! assert_eq!(parsed, price);
//! ```
//!
//! The type is currency-agnostic; the host layer appends the currency code.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Number of fraction digits carried by minor units.
pub const MINOR_UNIT_DIGITS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit
/// (halalas for SAR, cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use sana_core::money::Money;
    ///
    /// let price = Money::from_minor(10050); // Represents 100.50
    /// assert_eq!(price.minor_units(), 10050);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use sana_core::money::Money;
    ///
    /// let price = Money::from_major_minor(150, 0);
    /// assert_eq!(price.minor_units(), 15000);
    ///
    /// let negative = Money::from_major_minor(-5, 50);
    /// assert_eq!(negative.minor_units(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Rounds an exact decimal amount to minor units.
    ///
    /// Midpoints round away from zero (`0.005 → 0.01`), which is what a
    /// two-digit fixed display of the exact value shows.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use sana_core::money::Money;
    ///
    /// let exact = Decimal::new(60750, 2); // 607.50
    /// assert_eq!(Money::from_decimal_rounded(exact).unwrap().minor_units(), 60750);
    ///
    /// let midpoint = Decimal::new(10005, 3); // 10.005
    /// assert_eq!(Money::from_decimal_rounded(midpoint).unwrap().minor_units(), 1001);
    /// ```
    pub fn from_decimal_rounded(amount: Decimal) -> CoreResult<Self> {
        let rounded =
            amount.round_dp_with_strategy(MINOR_UNIT_DIGITS, RoundingStrategy::MidpointAwayFromZero);
        let minor = rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.to_i64())
            .ok_or_else(|| CoreError::InvalidAmount {
                amount: amount.to_string(),
                reason: "does not fit in minor units".to_string(),
            })?;
        Ok(Money(minor))
    }

    /// Like [`Money::from_decimal_rounded`], but pins amounts beyond the
    /// i64 range to `i64::MIN`/`i64::MAX` instead of failing.
    ///
    /// Base prices are capped by validation, so pricing never reaches the
    /// bounds in practice.
    pub fn from_decimal_rounded_saturating(amount: Decimal) -> Self {
        Money::from_decimal_rounded(amount).unwrap_or(if amount.is_sign_negative() {
            Money(i64::MIN)
        } else {
            Money(i64::MAX)
        })
    }

    /// Returns the exact decimal value (`15000` → `150.00`).
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MINOR_UNIT_DIGITS)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use sana_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1099).major(), 10);
    /// assert_eq!(Money::from_minor(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two fraction digits and no currency (`150.00`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

/// Parses a decimal amount such as `150`, `150.5` or `150.00`.
///
/// Amounts with more than two fraction digits are rejected rather than
/// silently rounded.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount = Decimal::from_str(trimmed).map_err(|e| CoreError::InvalidAmount {
            amount: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        Money::try_from(amount)
    }
}

/// Exact conversion: fails when the decimal has sub-minor-unit precision.
impl TryFrom<Decimal> for Money {
    type Error = CoreError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        if amount.normalize().scale() > MINOR_UNIT_DIGITS {
            return Err(CoreError::InvalidAmount {
                amount: amount.to_string(),
                reason: format!("at most {} fraction digits allowed", MINOR_UNIT_DIGITS),
            });
        }
        Money::from_decimal_rounded(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor_units(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(15000).to_string(), "150.00");
        assert_eq!(Money::from_minor(500).to_string(), "5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("150".parse::<Money>().unwrap(), Money::from_minor(15000));
        assert_eq!("150.5".parse::<Money>().unwrap(), Money::from_minor(15050));
        assert_eq!(" 99.99 ".parse::<Money>().unwrap(), Money::from_minor(9999));
        assert_eq!("100.000".parse::<Money>().unwrap(), Money::from_minor(10000));

        assert!("abc".parse::<Money>().is_err());
        assert!("10.005".parse::<Money>().is_err());
    }

    #[test]
    fn test_decimal_round_trip_is_exact() {
        let price = Money::from_minor(22550);
        assert_eq!(price.to_decimal(), Decimal::new(22550, 2));
        assert_eq!(Money::try_from(price.to_decimal()).unwrap(), price);
    }

    #[test]
    fn test_rounding_midpoint_goes_away_from_zero() {
        assert_eq!(
            Money::from_decimal_rounded(Decimal::new(12345, 3)).unwrap(),
            Money::from_minor(1235)
        );
        assert_eq!(
            Money::from_decimal_rounded(Decimal::new(-12345, 3)).unwrap(),
            Money::from_minor(-1235)
        );
        assert_eq!(
            Money::from_decimal_rounded(Decimal::new(12344, 3)).unwrap(),
            Money::from_minor(1234)
        );
    }

    #[test]
    fn test_rounding_saturates_out_of_range() {
        let huge = Decimal::MAX;
        assert_eq!(Money::from_decimal_rounded_saturating(huge).minor_units(), i64::MAX);
        assert_eq!(Money::from_decimal_rounded_saturating(-huge).minor_units(), i64::MIN);
        assert!(Money::from_decimal_rounded(huge).is_err());
    }

    #[test]
    fn test_is_positive() {
        assert!(Money::from_minor(1).is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::from_minor(-100).is_positive());
    }
}
