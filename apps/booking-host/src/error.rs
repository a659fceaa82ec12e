//! # Host Error Types
//!
//! Two error types live here:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Booking Host                       │
//! │                                                                         │
//! │  Startup (config, stdin/stdout)          Per command                    │
//! │  ──────────────────────────────          ───────────                    │
//! │                                                                         │
//! │  HostError ──► main() prints it,         ApiError ──► serialized into   │
//! │                exits non-zero                         the response line │
//! │                                                       and the loop     │
//! │                                                       keeps going      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The booking UI receives:
//! ```json
//! { "ok": false, "error": { "code": "NO_ACTIVE_SESSION", "message": "..." } }
//! ```

use serde::Serialize;
use thiserror::Error;

use sana_core::{CoreError, ValidationError};

// =============================================================================
// Host Error
// =============================================================================

/// Result type alias for host startup and transport.
pub type HostResult<T> = Result<T, HostError>;

/// Failures that stop the host.
#[derive(Debug, Error)]
pub enum HostError {
    /// Configuration values are unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Could not read or write a file, stdin or stdout.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Could not encode a response line.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured service was rejected by the booking rules.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("No config path available for {0}")]
    NoConfigPath(&'static str),
}

// =============================================================================
// API Error
// =============================================================================

/// Error returned to the booking UI for a single command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable message for display
    pub message: String,
}

/// Error codes of the command protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A command other than `start` arrived with no booking open.
    NoActiveSession,

    /// Input was understood but rejected (bad date, bad service config).
    ValidationError,

    /// The line was not a known command.
    InvalidCommand,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn no_active_session() -> Self {
        ApiError::new(
            ErrorCode::NoActiveSession,
            "No booking in progress. Send a start command first.",
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn invalid_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidCommand, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownServiceKind(_) => ApiError::invalid_command(err.to_string()),
            CoreError::InvalidAmount { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// A host failure surfacing inside a command (e.g. building a configured
/// service) is logged and reported without internals.
impl From<HostError> for ApiError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Core(e) => e.into(),
            other => {
                tracing::error!("Host error while handling command: {}", other);
                ApiError::internal("Internal error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serialization() {
        let err = ApiError::no_active_session();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NO_ACTIVE_SESSION");
        assert!(json["message"].as_str().unwrap().contains("start"));
    }

    #[test]
    fn test_core_error_mapping() {
        let unknown: ApiError = CoreError::UnknownServiceKind("grooming".into()).into();
        assert_eq!(unknown.code, ErrorCode::InvalidCommand);

        let invalid: ApiError = CoreError::Validation(ValidationError::MustBePositive {
            field: "base price".into(),
        })
        .into();
        assert_eq!(invalid.code, ErrorCode::ValidationError);
        assert_eq!(invalid.message, "base price must be positive");
    }

    #[test]
    fn test_host_error_hides_internals() {
        let io = HostError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"));
        let api: ApiError = io.into();
        assert_eq!(api.code, ErrorCode::Internal);
        assert!(!api.message.contains("disk"));
    }
}
