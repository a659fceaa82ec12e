//! # Error Types
//!
//! Domain-specific error types for sana-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sana-core errors (this file)                                          │
//! │  ├── CoreError        - Configuration and parsing failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  booking-host errors (app)                                             │
//! │  ├── HostError        - Startup failures (config file, I/O)            │
//! │  └── ApiError         - What the booking UI sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Booking UI             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Navigation and selection changes never fail: out-of-range requests are
//! clamped or ignored. Errors only come from building a configuration or
//! parsing raw input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Service kind string is not one the wizard knows.
    ///
    /// ## When This Occurs
    /// - Host page passes a service slug other than `shrink` or `trimming`
    /// - Config file or command names a service that does not exist
    #[error("Unknown service kind: '{0}'. Valid options: shrink, trimming")]
    UnknownServiceKind(String),

    /// A decimal amount cannot be represented as money.
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
