//! # sana-core: Booking Wizard Logic for Sana
//!
//! This crate holds the booking wizard's state machine and pricing engine
//! as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sana Booking Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Booking UI (step screens)                    │   │
//! │  │   Type ──► Frequency ──► Horses ──► Date ──► Confirmation      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    booking-host (host page)                     │   │
//! │  │    start, next, back, set_frequency, set_horse_count, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sana-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │   flow    │  │  summary  │  │   │
//! │  │   │ServiceKind│  │  Engine   │  │  State    │  │ Reference │  │   │
//! │  │   │ HorseCount│  │  Quote    │  │  Machine  │  │  Summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • DETERMINISTIC PRICING              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ServiceKind, ShrinkType, Frequency, HorseCount, ...)
//! - [`money`] - Money type with integer minor units
//! - [`pricing`] - The pricing formula and its breakdown
//! - [`flow`] - The wizard state machine
//! - [`summary`] - Confirmation payload handed to the summary/export side
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use sana_core::flow::{BookingStateMachine, FlowPosition};
//! use sana_core::money::Money;
//! use sana_core::types::{BookingConfiguration, Frequency, ServiceKind};
//!
//! let config = BookingConfiguration::new(
//!     ServiceKind::Trimming,
//!     Money::from_major_minor(100, 0),
//!     "Trimming Services",
//! )
//! .unwrap();
//!
//! let mut flow = BookingStateMachine::new(config);
//! flow.set_frequency(Frequency::Annual);
//! flow.set_horse_count(10);
//!
//! flow.advance();
//! flow.advance();
//! assert_eq!(flow.advance(), FlowPosition::Summary);
//!
//! // 100 × 10 × 0.9 (annual) × 0.9 (volume) = 810.00
//! assert_eq!(flow.quote().total.to_string(), "810.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod flow;
pub mod money;
pub mod pricing;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use flow::{BookingStateMachine, FlowPosition, FlowSnapshot};
pub use money::Money;
pub use pricing::{PriceBreakdown, PriceQuote, PricingEngine};
pub use summary::{BookingReference, BookingSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fewest horses a booking can cover.
pub const MIN_HORSE_COUNT: u8 = 1;

/// Most horses a single booking can cover.
///
/// ## Business Reason
/// Larger jobs are quoted by hand; the wizard caps the counter at 10.
pub const MAX_HORSE_COUNT: u8 = 10;

/// Horse count at which the volume discount kicks in.
pub const VOLUME_DISCOUNT_THRESHOLD: u8 = 10;

/// Highest base price a configuration accepts, in minor units (1,000,000.00).
///
/// Keeps every priced total comfortably inside the `Money` range.
pub const MAX_BASE_PRICE_MINOR: i64 = 100_000_000;

/// Longest service name accepted in a booking configuration.
pub const MAX_SERVICE_NAME_LEN: usize = 100;

/// Prefix of every booking reference (`SANA-0042`).
pub const BOOKING_REFERENCE_PREFIX: &str = "SANA";
