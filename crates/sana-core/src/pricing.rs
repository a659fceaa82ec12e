//! # Pricing Engine
//!
//! The one pricing formula used for both the running total shown while the
//! user edits and the final total on the confirmation screen.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. unit  = base_price                                                  │
//! │  2. unit ×= 1.20 (Aluminum) | 1.50 (Orthopedic)    Shrink only          │
//! │  3. total = unit × horses                                               │
//! │  4. total ×= 0.90                                  Annual               │
//! │  5. total ×= 0.90                                  horses ≥ 10          │
//! │  6. round to 2 digits                              display only         │
//! │                                                                         │
//! │  Discounts STACK multiplicatively: Annual + 10 horses = × 0.81,         │
//! │  not × 0.80.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The canonical result is the exact [`Decimal`]; rounding happens once,
//! when the quote is turned into [`Money`].

use rust_decimal::Decimal;
use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{BookingConfiguration, BookingSelections, Frequency, HorseCount, ServiceKind, ShrinkType};
use crate::VOLUME_DISCOUNT_THRESHOLD;

/// Volume discount for bookings at or above [`VOLUME_DISCOUNT_THRESHOLD`], in percent.
pub const VOLUME_DISCOUNT_PERCENT: u32 = 10;

/// Stateless pricing calculator.
pub struct PricingEngine;

impl PricingEngine {
    /// Computes the exact, unrounded total.
    ///
    /// Pure: the same arguments always give the same result.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use sana_core::money::Money;
    /// use sana_core::pricing::PricingEngine;
    /// use sana_core::types::{Frequency, HorseCount, ServiceKind, ShrinkType};
    ///
    /// let total = PricingEngine::compute_total(
    ///     ServiceKind::Shrink,
    ///     Money::from_major_minor(150, 0),
    ///     ShrinkType::Orthopedic,
    ///     Frequency::OneTime,
    ///     HorseCount::MIN,
    /// );
    /// assert_eq!(total, Decimal::from(225));
    /// ```
    pub fn compute_total(
        service_kind: ServiceKind,
        base_price: Money,
        shrink_type: ShrinkType,
        frequency: Frequency,
        horse_count: HorseCount,
    ) -> Decimal {
        let unit_price = Self::unit_price(service_kind, base_price, shrink_type);
        let mut total = unit_price * Decimal::from(horse_count.get());

        if frequency == Frequency::Annual {
            total *= percent_off(frequency.discount_percent());
        }

        if Self::volume_discount_applies(horse_count) {
            total *= percent_off(VOLUME_DISCOUNT_PERCENT);
        }

        total
    }

    /// Prices the current selections of a booking.
    ///
    /// Both the live price panel and the confirmation screen go through this,
    /// so they always agree.
    pub fn quote(config: &BookingConfiguration, selections: &BookingSelections) -> PriceQuote {
        let service_kind = config.service_kind();
        let base_price = config.base_price();

        let exact_total = Self::compute_total(
            service_kind,
            base_price,
            selections.shrink_type,
            selections.frequency,
            selections.horse_count,
        );

        let unit_price = Self::unit_price(service_kind, base_price, selections.shrink_type);
        let type_adjustment_percent = if service_kind.uses_shrink_type() {
            Some(selections.shrink_type.markup_percent()).filter(|pct| *pct > 0)
        } else {
            None
        };
        let volume_discount_percent = if Self::volume_discount_applies(selections.horse_count) {
            VOLUME_DISCOUNT_PERCENT
        } else {
            0
        };

        PriceQuote {
            exact_total,
            total: Money::from_decimal_rounded_saturating(exact_total),
            breakdown: PriceBreakdown {
                base_price,
                unit_price,
                type_adjustment_percent,
                horse_count: selections.horse_count,
                annual_discount_percent: selections.frequency.discount_percent(),
                volume_discount_percent,
            },
        }
    }

    /// Base price after the shoe-type markup (steps 1–2).
    pub fn unit_price(service_kind: ServiceKind, base_price: Money, shrink_type: ShrinkType) -> Decimal {
        let base = base_price.to_decimal();
        if service_kind.uses_shrink_type() {
            base * shrink_type.multiplier()
        } else {
            base
        }
    }

    /// Whether the horse count earns the volume discount.
    #[inline]
    pub fn volume_discount_applies(horse_count: HorseCount) -> bool {
        horse_count.get() >= VOLUME_DISCOUNT_THRESHOLD
    }
}

/// `10` → `0.90`
fn percent_off(percent: u32) -> Decimal {
    Decimal::ONE - Decimal::new(percent as i64, 2)
}

// =============================================================================
// Quote
// =============================================================================

/// A priced booking: exact total, display total and the figures behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Canonical unrounded total.
    #[ts(as = "String")]
    pub exact_total: Decimal,
    /// Total rounded to two fraction digits.
    pub total: Money,
    pub breakdown: PriceBreakdown,
}

/// Line items of the price panel.
///
/// ```text
/// Base price:                     150.00
/// Orthopedic type adjustment:       +50%
/// Number of horses:                  x10
/// Annual plan discount:             -10%
/// Volume discount:                  -10%
/// ─────────────────────────────────────
/// Total:                         1822.50
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: Money,
    /// Base price after the type markup.
    #[ts(as = "String")]
    pub unit_price: Decimal,
    /// Set only for Shrink bookings with a non-Steel type.
    pub type_adjustment_percent: Option<u32>,
    pub horse_count: HorseCount,
    /// 0 when not discounted.
    pub annual_discount_percent: u32,
    /// 0 when not discounted.
    pub volume_discount_percent: u32,
}

// =============================================================================
// Unit Tests
// =============================================================================
