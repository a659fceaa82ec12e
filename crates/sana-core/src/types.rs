//! # Domain Types
//!
//! Core domain types used throughout the booking wizard.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │ BookingConfiguration│   │ BookingSelections│  │      Step       │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  service_kind       │   │  shrink_type    │   │  0 ShrinkType   │   │
//! │  │  base_price         │   │  frequency      │   │  1 Frequency    │   │
//! │  │  service_name       │   │  horse_count    │   │  2 HorseCount   │   │
//! │  │  (immutable)        │   │  preferred_date │   │  3 Date         │   │
//! │  └─────────────────────┘   └─────────────────┘   └─────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ServiceKind    │   │   ShrinkType    │   │   Frequency     │       │
//! │  │  Shrink  (4)    │   │  Steel   ×1.00  │   │  OneTime        │       │
//! │  │  Trimming (3)   │   │  Aluminum ×1.20 │   │  Annual  ×0.90  │       │
//! │  └─────────────────┘   │  Orthopedic×1.50│   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Step Indices
//! Step indices are shared by both service kinds. The kind decides where the
//! wizard starts and how many steps it counts:
//!
//! | kind     | first index | total steps | reachable steps                    |
//! |----------|-------------|-------------|------------------------------------|
//! | Shrink   | 0           | 4           | ShrinkType, Frequency, Horses, Date|
//! | Trimming | 1           | 3           | Frequency, Horses                  |
//!
//! Navigation advances while `index < total_steps - 1`, so for Trimming the
//! summary follows the horse-count step.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_base_price, validate_horse_count, validate_service_name};
use crate::{MAX_HORSE_COUNT, MIN_HORSE_COUNT};

// =============================================================================
// Service Kind
// =============================================================================

/// The category of booked service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Farrier shoeing; asks for the shoe type first.
    Shrink,
    /// Hoof trimming; no type selection.
    Trimming,
}

impl ServiceKind {
    /// Number of steps the wizard counts for this kind.
    #[inline]
    pub const fn total_steps(&self) -> usize {
        match self {
            ServiceKind::Shrink => 4,
            ServiceKind::Trimming => 3,
        }
    }

    /// Index the wizard starts on.
    #[inline]
    pub const fn first_step_index(&self) -> usize {
        match self {
            ServiceKind::Shrink => 0,
            ServiceKind::Trimming => 1,
        }
    }

    /// Index after which the wizard moves to the summary.
    #[inline]
    pub const fn last_step_index(&self) -> usize {
        self.total_steps() - 1
    }

    /// Returns the step at a shared index, if this kind can show it.
    pub fn step_at(&self, index: usize) -> Option<Step> {
        if index < self.first_step_index() || index > self.last_step_index() {
            return None;
        }
        Step::from_index(index)
    }

    /// Checks whether the wizard for this kind can show `step`.
    pub fn has_step(&self, step: Step) -> bool {
        self.step_at(step.index()).is_some()
    }

    /// Steps this kind shows, in order.
    pub fn steps(&self) -> Vec<Step> {
        (self.first_step_index()..self.total_steps())
            .filter_map(Step::from_index)
            .collect()
    }

    /// Whether the shoe type affects pricing and the summary.
    #[inline]
    pub const fn uses_shrink_type(&self) -> bool {
        matches!(self, ServiceKind::Shrink)
    }

    /// URL-style slug (`shrink`, `trimming`).
    pub const fn slug(&self) -> &'static str {
        match self {
            ServiceKind::Shrink => "shrink",
            ServiceKind::Trimming => "trimming",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ServiceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shrink" => Ok(ServiceKind::Shrink),
            "trimming" => Ok(ServiceKind::Trimming),
            other => Err(CoreError::UnknownServiceKind(other.to_string())),
        }
    }
}

// =============================================================================
// Step
// =============================================================================

/// A wizard step. See [`Step::index`] for the shared index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ShrinkTypeSelection,
    FrequencySelection,
    HorseCountSelection,
    DateSelection,
}

impl Step {
    /// Returns the step for a shared index.
    pub const fn from_index(index: usize) -> Option<Step> {
        match index {
            0 => Some(Step::ShrinkTypeSelection),
            1 => Some(Step::FrequencySelection),
            2 => Some(Step::HorseCountSelection),
            3 => Some(Step::DateSelection),
            _ => None,
        }
    }

    /// The shared index of this step.
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            Step::ShrinkTypeSelection => 0,
            Step::FrequencySelection => 1,
            Step::HorseCountSelection => 2,
            Step::DateSelection => 3,
        }
    }

    /// Heading shown above the step.
    pub const fn title(&self) -> &'static str {
        match self {
            Step::ShrinkTypeSelection => "Select Shrink Type",
            Step::FrequencySelection => "Select Service Frequency",
            Step::HorseCountSelection => "Number of Horses",
            Step::DateSelection => "Select Preferred Date",
        }
    }
}

// =============================================================================
// Shrink Type
// =============================================================================

/// Material or therapeutic variant of a shoeing service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShrinkType {
    /// Standard steel shoes.
    #[default]
    Steel,
    /// Lightweight aluminum shoes (+20%).
    Aluminum,
    /// Therapeutic shoes (+50%).
    Orthopedic,
}

impl ShrinkType {
    /// All shoe types, in the order the selector lists them.
    pub const ALL: [ShrinkType; 3] = [ShrinkType::Steel, ShrinkType::Aluminum, ShrinkType::Orthopedic];

    /// Price markup over the base price, in percent.
    #[inline]
    pub const fn markup_percent(&self) -> u32 {
        match self {
            ShrinkType::Steel => 0,
            ShrinkType::Aluminum => 20,
            ShrinkType::Orthopedic => 50,
        }
    }

    /// Factor applied to the base price (`1.20` for Aluminum).
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE + Decimal::new(self.markup_percent() as i64, 2)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            ShrinkType::Steel => "Steel",
            ShrinkType::Aluminum => "Aluminum",
            ShrinkType::Orthopedic => "Orthopedic",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            ShrinkType::Steel => "Standard steel shoes, durable and economical",
            ShrinkType::Aluminum => "Lightweight aluminum shoes, ideal for performance horses",
            ShrinkType::Orthopedic => "Specialized therapeutic shoes for horses with hoof issues",
        }
    }
}

// =============================================================================
// Frequency
// =============================================================================

/// Billing cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    OneTime,
    /// Annual plan, 10% off.
    Annual,
}

impl Frequency {
    /// Both cadences, in the order the selector lists them.
    pub const ALL: [Frequency; 2] = [Frequency::OneTime, Frequency::Annual];

    /// Discount granted by this cadence, in percent.
    #[inline]
    pub const fn discount_percent(&self) -> u32 {
        match self {
            Frequency::OneTime => 0,
            Frequency::Annual => 10,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Frequency::OneTime => "One-time",
            Frequency::Annual => "Annual",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Frequency::OneTime => "Book a single appointment for this service",
            Frequency::Annual => "Regular service throughout the year (10% discount)",
        }
    }
}

// =============================================================================
// Horse Count
// =============================================================================

/// Number of horses covered by a booking, always within
/// [`MIN_HORSE_COUNT`]..=[`MAX_HORSE_COUNT`].
///
/// ## Two Ways In
/// ```text
/// Counter buttons / typed value ──► HorseCount::clamped(n)  (never fails)
/// Untrusted JSON / API input   ──► HorseCount::new(n)      (strict)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, as = "u8")]
#[serde(try_from = "i64", into = "u8")]
pub struct HorseCount(u8);

impl HorseCount {
    pub const MIN: HorseCount = HorseCount(MIN_HORSE_COUNT);
    pub const MAX: HorseCount = HorseCount(MAX_HORSE_COUNT);

    /// Strict constructor: rejects values outside the allowed range.
    pub fn new(count: i64) -> Result<Self, ValidationError> {
        validate_horse_count(count)?;
        Ok(HorseCount(count as u8))
    }

    /// Forgiving constructor: pulls out-of-range values to the nearest bound.
    pub fn clamped(count: i64) -> Self {
        let clamped = count.clamp(MIN_HORSE_COUNT as i64, MAX_HORSE_COUNT as i64);
        HorseCount(clamped as u8)
    }

    /// One more horse; no-op at the maximum.
    #[must_use]
    pub const fn increment(self) -> Self {
        if self.0 < MAX_HORSE_COUNT {
            HorseCount(self.0 + 1)
        } else {
            self
        }
    }

    /// One fewer horse; no-op at the minimum.
    #[must_use]
    pub const fn decrement(self) -> Self {
        if self.0 > MIN_HORSE_COUNT {
            HorseCount(self.0 - 1)
        } else {
            self
        }
    }

    #[inline]
    pub const fn get(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_max(&self) -> bool {
        self.0 == MAX_HORSE_COUNT
    }

    #[inline]
    pub const fn is_min(&self) -> bool {
        self.0 == MIN_HORSE_COUNT
    }
}

impl Default for HorseCount {
    fn default() -> Self {
        HorseCount::MIN
    }
}

impl TryFrom<i64> for HorseCount {
    type Error = ValidationError;

    fn try_from(count: i64) -> Result<Self, Self::Error> {
        HorseCount::new(count)
    }
}

impl From<HorseCount> for u8 {
    fn from(count: HorseCount) -> Self {
        count.0
    }
}

impl fmt::Display for HorseCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Booking Configuration
// =============================================================================

/// Immutable input supplied by the host page when a booking session starts.
///
/// Only constructible through [`BookingConfiguration::new`], so every value
/// in circulation has a positive base price and a usable service name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfiguration {
    service_kind: ServiceKind,
    base_price: Money,
    service_name: String,
}

impl BookingConfiguration {
    /// Validates and builds a configuration.
    ///
    /// ## Errors
    /// - base price is zero or negative
    /// - service name is blank or longer than [`crate::MAX_SERVICE_NAME_LEN`]
    ///
    /// ## Example
    /// ```rust
    /// use sana_core::money::Money;
    /// use sana_core::types::{BookingConfiguration, ServiceKind};
    ///
    /// let config = BookingConfiguration::new(
    ///     ServiceKind::Shrink,
    ///     Money::from_major_minor(150, 0),
    ///     "Shrink Services",
    /// );
    /// assert!(config.is_ok());
    ///
    /// let free = BookingConfiguration::new(ServiceKind::Shrink, Money::zero(), "Free");
    /// assert!(free.is_err());
    /// ```
    pub fn new(
        service_kind: ServiceKind,
        base_price: Money,
        service_name: impl Into<String>,
    ) -> CoreResult<Self> {
        let service_name = service_name.into();
        validate_base_price(base_price)?;
        validate_service_name(&service_name)?;

        Ok(BookingConfiguration {
            service_kind,
            base_price,
            service_name: service_name.trim().to_string(),
        })
    }

    #[inline]
    pub fn service_kind(&self) -> ServiceKind {
        self.service_kind
    }

    #[inline]
    pub fn base_price(&self) -> Money {
        self.base_price
    }

    #[inline]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

// =============================================================================
// Booking Selections
// =============================================================================

/// The user's choices for one booking session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingSelections {
    /// Only meaningful for [`ServiceKind::Shrink`].
    pub shrink_type: ShrinkType,
    pub frequency: Frequency,
    pub horse_count: HorseCount,
    /// Free-form optional date; no constraint that it lies in the future.
    #[ts(as = "Option<String>")]
    pub preferred_date: Option<NaiveDate>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_counts_per_kind() {
        assert_eq!(ServiceKind::Shrink.total_steps(), 4);
        assert_eq!(ServiceKind::Trimming.total_steps(), 3);
        assert_eq!(ServiceKind::Shrink.first_step_index(), 0);
        assert_eq!(ServiceKind::Trimming.first_step_index(), 1);
    }

    #[test]
    fn test_step_table() {
        assert_eq!(
            ServiceKind::Shrink.steps(),
            vec![
                Step::ShrinkTypeSelection,
                Step::FrequencySelection,
                Step::HorseCountSelection,
                Step::DateSelection,
            ]
        );
        assert_eq!(
            ServiceKind::Trimming.steps(),
            vec![Step::FrequencySelection, Step::HorseCountSelection]
        );
        assert!(!ServiceKind::Trimming.has_step(Step::ShrinkTypeSelection));
        assert_eq!(ServiceKind::Trimming.step_at(0), None);
        assert_eq!(ServiceKind::Shrink.step_at(4), None);
    }

    #[test]
    fn test_step_index_round_trip() {
        for index in 0..4 {
            assert_eq!(Step::from_index(index).unwrap().index(), index);
        }
        assert_eq!(Step::from_index(4), None);
    }

    #[test]
    fn test_service_kind_parsing() {
        assert_eq!("shrink".parse::<ServiceKind>().unwrap(), ServiceKind::Shrink);
        assert_eq!(" Trimming ".parse::<ServiceKind>().unwrap(), ServiceKind::Trimming);
        assert!(matches!(
            "grooming".parse::<ServiceKind>(),
            Err(CoreError::UnknownServiceKind(_))
        ));
    }

    #[test]
    fn test_shrink_type_multipliers() {
        assert_eq!(ShrinkType::Steel.multiplier(), Decimal::ONE);
        assert_eq!(ShrinkType::Aluminum.multiplier(), Decimal::new(120, 2));
        assert_eq!(ShrinkType::Orthopedic.multiplier(), Decimal::new(150, 2));
    }

    #[test]
    fn test_defaults() {
        let selections = BookingSelections::default();
        assert_eq!(selections.shrink_type, ShrinkType::Steel);
        assert_eq!(selections.frequency, Frequency::OneTime);
        assert_eq!(selections.horse_count.get(), 1);
        assert_eq!(selections.preferred_date, None);
    }

    #[test]
    fn test_horse_count_clamps() {
        assert_eq!(HorseCount::clamped(0).get(), 1);
        assert_eq!(HorseCount::clamped(-7).get(), 1);
        assert_eq!(HorseCount::clamped(50).get(), 10);
        assert_eq!(HorseCount::clamped(4).get(), 4);

        assert_eq!(HorseCount::MAX.increment(), HorseCount::MAX);
        assert_eq!(HorseCount::MIN.decrement(), HorseCount::MIN);
    }

    #[test]
    fn test_horse_count_strict() {
        assert!(HorseCount::new(1).is_ok());
        assert!(HorseCount::new(10).is_ok());
        assert!(HorseCount::new(0).is_err());
        assert!(HorseCount::new(11).is_err());
    }

    #[test]
    fn test_horse_count_deserialize_is_strict() {
        let ok: HorseCount = serde_json::from_str("3").unwrap();
        assert_eq!(ok.get(), 3);
        assert!(serde_json::from_str::<HorseCount>("0").is_err());
        assert!(serde_json::from_str::<HorseCount>("11").is_err());
    }

    #[test]
    fn test_horse_count_binding_is_a_number() {
        assert_eq!(HorseCount::inline(), "number");
    }

    #[test]
    fn test_configuration_rejects_bad_input() {
        assert!(BookingConfiguration::new(ServiceKind::Trimming, Money::from_minor(-1), "Trim").is_err());
        assert!(BookingConfiguration::new(ServiceKind::Trimming, Money::from_minor(100), "  ").is_err());

        let config =
            BookingConfiguration::new(ServiceKind::Trimming, Money::from_minor(10000), " Trimming ").unwrap();
        assert_eq!(config.service_name(), "Trimming");
        assert_eq!(config.base_price(), Money::from_minor(10000));
    }
}
