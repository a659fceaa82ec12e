//! # Booking Summary
//!
//! The read-only confirmation payload shown once the wizard completes.
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │  Booking Summary          SANA-0427   │
//! │  ───────────────────────────────────  │
//! │  Service:        Shrink Services      │
//! │  Shrink Type:    Aluminum   (Shrink)  │
//! │  Frequency:      Annual               │
//! │  Horses:         3                    │
//! │  Preferred Date: Monday, March 3, 2025│
//! │  ───────────────────────────────────  │
//! │  Total:          486.00               │
//! └───────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::pricing::PriceQuote;
use crate::types::{BookingConfiguration, BookingSelections, Frequency, HorseCount, ServiceKind, ShrinkType};
use crate::BOOKING_REFERENCE_PREFIX;

/// Long date format of the summary screen.
pub const SUMMARY_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Shown in place of a missing preferred date.
pub const DATE_NOT_SPECIFIED: &str = "Not specified";

// =============================================================================
// Booking Reference
// =============================================================================

/// Human-readable booking reference (`SANA-0427`).
///
/// Not unique; it is a label for the customer, not a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export, type = "string")]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    /// Draws four digits from a fresh v4 UUID.
    pub fn generate() -> Self {
        let number = (Uuid::new_v4().as_u128() % 10_000) as u16;
        Self::from_number(number)
    }

    /// Builds a reference from a number; only the last four digits are kept.
    pub fn from_number(number: u16) -> Self {
        BookingReference(format!("{}-{:04}", BOOKING_REFERENCE_PREFIX, number % 10_000))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Everything the confirmation screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub reference: BookingReference,
    pub service_kind: ServiceKind,
    pub service_name: String,
    /// Present only for Shrink bookings.
    pub shrink_type: Option<ShrinkType>,
    pub frequency: Frequency,
    pub horse_count: HorseCount,
    #[ts(as = "Option<String>")]
    pub preferred_date: Option<NaiveDate>,
    pub quote: PriceQuote,
    #[ts(as = "String")]
    pub confirmed_at: DateTime<Utc>,
}

impl BookingSummary {
    /// Builds a summary with a fresh reference, stamped now.
    pub fn new(config: &BookingConfiguration, selections: &BookingSelections, quote: PriceQuote) -> Self {
        Self::with_reference(config, selections, quote, BookingReference::generate(), Utc::now())
    }

    /// Builds a summary with a given reference and timestamp.
    pub fn with_reference(
        config: &BookingConfiguration,
        selections: &BookingSelections,
        quote: PriceQuote,
        reference: BookingReference,
        confirmed_at: DateTime<Utc>,
    ) -> Self {
        let service_kind = config.service_kind();
        let shrink_type = service_kind.uses_shrink_type().then_some(selections.shrink_type);

        BookingSummary {
            reference,
            service_kind,
            service_name: config.service_name().to_string(),
            shrink_type,
            frequency: selections.frequency,
            horse_count: selections.horse_count,
            preferred_date: selections.preferred_date,
            quote,
            confirmed_at,
        }
    }

    /// The preferred date as the summary screen prints it.
    pub fn preferred_date_label(&self) -> String {
        format_preferred_date(self.preferred_date)
    }
}

/// `2025-03-03` → `Monday, March 3, 2025`; `None` → `Not specified`.
pub fn format_preferred_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(SUMMARY_DATE_FORMAT).to_string(),
        None => DATE_NOT_SPECIFIED.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::pricing::PricingEngine;
    use chrono::TimeZone;

    fn config(kind: ServiceKind) -> BookingConfiguration {
        BookingConfiguration::new(kind, Money::from_major_minor(150, 0), "Shrink Services").unwrap()
    }

    #[test]
    fn test_reference_format() {
        assert_eq!(BookingReference::from_number(42).as_str(), "SANA-0042");
        assert_eq!(BookingReference::from_number(9999).to_string(), "SANA-9999");

        let generated = BookingReference::generate();
        let digits = generated.as_str().strip_prefix("SANA-").unwrap();
        assert_eq!(digits.len(), 4);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_reference_binding_is_a_string() {
        assert_eq!(BookingReference::inline(), "string");
        let json = serde_json::to_value(BookingReference::from_number(7)).unwrap();
        assert_eq!(json, "SANA-0007");
    }

    #[test]
    fn test_format_preferred_date() {
        assert_eq!(
            format_preferred_date(NaiveDate::from_ymd_opt(2025, 3, 3)),
            "Monday, March 3, 2025"
        );
        assert_eq!(format_preferred_date(None), "Not specified");
    }

    #[test]
    fn test_shrink_type_only_for_shrink() {
        let selections = BookingSelections {
            shrink_type: ShrinkType::Orthopedic,
            ..BookingSelections::default()
        };

        let shrink = config(ServiceKind::Shrink);
        let summary = BookingSummary::new(&shrink, &selections, PricingEngine::quote(&shrink, &selections));
        assert_eq!(summary.shrink_type, Some(ShrinkType::Orthopedic));

        let trimming = config(ServiceKind::Trimming);
        let summary = BookingSummary::new(&trimming, &selections, PricingEngine::quote(&trimming, &selections));
        assert_eq!(summary.shrink_type, None);
    }

    #[test]
    fn test_summary_json() {
        let shrink = config(ServiceKind::Shrink);
        let selections = BookingSelections {
            preferred_date: NaiveDate::from_ymd_opt(2025, 3, 3),
            ..BookingSelections::default()
        };
        let confirmed_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let summary = BookingSummary::with_reference(
            &shrink,
            &selections,
            PricingEngine::quote(&shrink, &selections),
            BookingReference::from_number(7),
            confirmed_at,
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["reference"], "SANA-0007");
        assert_eq!(json["serviceName"], "Shrink Services");
        assert_eq!(json["shrinkType"], "steel");
        assert_eq!(json["preferredDate"], "2025-03-03");
        assert_eq!(json["quote"]["total"], 15000);
        assert_eq!(summary.preferred_date_label(), "Monday, March 3, 2025");
    }
}
