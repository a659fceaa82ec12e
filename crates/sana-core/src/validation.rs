//! # Validation Module
//!
//! Input validation for booking configuration and raw UI input.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Booking UI                                                   │
//! │  ├── Disabled +/- buttons at the horse-count bounds                    │
//! │  └── Native date picker                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Host commands (JSON deserialization)                         │
//! │  └── THIS MODULE: configuration checks, date parsing                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Domain types                                                 │
//! │  └── HorseCount keeps 1..=10 by construction                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sana_core::money::Money;
//! use sana_core::validation::{parse_preferred_date, validate_base_price};
//!
//! assert!(validate_base_price(Money::from_minor(15000)).is_ok());
//! assert_eq!(parse_preferred_date("").unwrap(), None);
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_BASE_PRICE_MINOR, MAX_HORSE_COUNT, MAX_SERVICE_NAME_LEN, MIN_HORSE_COUNT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date format accepted from the date picker.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Configuration Validators
// =============================================================================

/// Validates the base price of a service.
///
/// ## Rules
/// - Must be strictly positive; a zero price means the host page forgot to
///   supply one
/// - At most [`MAX_BASE_PRICE_MINOR`] minor units
pub fn validate_base_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "base price".to_string(),
        });
    }

    if price.minor_units() > MAX_BASE_PRICE_MINOR {
        return Err(ValidationError::OutOfRange {
            field: "base price (minor units)".to_string(),
            min: 1,
            max: MAX_BASE_PRICE_MINOR,
        });
    }

    Ok(())
}

/// Validates a service display name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_SERVICE_NAME_LEN`] characters after trimming
///
/// ## Example
/// ```rust
/// use sana_core::validation::validate_service_name;
///
/// assert!(validate_service_name("Shrink Services").is_ok());
/// assert!(validate_service_name("   ").is_err());
/// ```
pub fn validate_service_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "service name".to_string(),
        });
    }

    if name.chars().count() > MAX_SERVICE_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "service name".to_string(),
            max: MAX_SERVICE_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Selection Validators
// =============================================================================

/// Validates a horse count strictly.
///
/// The state machine clamps instead of calling this; it is for callers that
/// want to reject bad input (deserialization, [`crate::HorseCount::new`]).
pub fn validate_horse_count(count: i64) -> ValidationResult<()> {
    if count < MIN_HORSE_COUNT as i64 || count > MAX_HORSE_COUNT as i64 {
        return Err(ValidationError::OutOfRange {
            field: "horse count".to_string(),
            min: MIN_HORSE_COUNT as i64,
            max: MAX_HORSE_COUNT as i64,
        });
    }

    Ok(())
}

/// Parses the value of the date picker.
///
/// ## Rules
/// - Empty input clears the date (`Ok(None)`)
/// - Otherwise `YYYY-MM-DD`
/// - Past dates are accepted
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use sana_core::validation::parse_preferred_date;
///
/// assert_eq!(
///     parse_preferred_date("2025-03-03").unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 3)
/// );
/// assert!(parse_preferred_date("03/03/2025").is_err());
/// ```
pub fn parse_preferred_date(input: &str) -> ValidationResult<Option<NaiveDate>> {
    let input = input.trim();

    if input.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(input, DATE_INPUT_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidFormat {
            field: "preferred date".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
