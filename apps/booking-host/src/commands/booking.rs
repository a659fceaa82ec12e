//! # Booking Commands
//!
//! One JSON object per command, tagged by `command`:
//!
//! ```text
//! {"command":"start","service":"shrink"}
//! {"command":"set_shrink_type","shrink_type":"aluminum"}
//! {"command":"set_frequency","frequency":"annual"}
//! {"command":"set_horse_count","count":4}
//! {"command":"increment_horses"}           {"command":"decrement_horses"}
//! {"command":"set_preferred_date","date":"2025-03-03"}   ("" or null clears)
//! {"command":"next"}   {"command":"back"}   {"command":"return_to_editing"}
//! {"command":"view"}   {"command":"leave"}
//! ```
//!
//! `service` is matched case-insensitively. `count` takes any JSON number
//! or numeric string: fractions truncate and huge values saturate before the
//! state machine clamps them, so an out-of-range count is never an error.
//!
//! Every command except `start` needs an open booking. Edits sent while the
//! summary shows are ignored by the state machine and answered with the
//! unchanged view.

use chrono::Utc;
use sana_core::validation::parse_preferred_date;
use sana_core::{FlowPosition, Frequency, ServiceKind, ShrinkType};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::view::FlowView;
use crate::config::HostConfig;
use crate::error::ApiError;
use crate::state::{BookingSession, SessionState};

/// A command from the booking UI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BookingCommand {
    /// Open a booking for a service page.
    Start {
        #[serde(deserialize_with = "service_from_str")]
        service: ServiceKind,
    },
    Next,
    Back,
    ReturnToEditing,
    SetShrinkType { shrink_type: ShrinkType },
    SetFrequency { frequency: Frequency },
    /// Typed value; clamped to 1..=10.
    SetHorseCount {
        #[serde(deserialize_with = "lenient_count")]
        count: i64,
    },
    IncrementHorses,
    DecrementHorses,
    SetPreferredDate {
        #[serde(default)]
        date: Option<String>,
    },
    /// Re-render without changing anything.
    View,
    /// Close the booking.
    Leave,
}

impl BookingCommand {
    /// Whether this command changes the selections.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            BookingCommand::SetShrinkType { .. }
                | BookingCommand::SetFrequency { .. }
                | BookingCommand::SetHorseCount { .. }
                | BookingCommand::IncrementHorses
                | BookingCommand::DecrementHorses
                | BookingCommand::SetPreferredDate { .. }
        )
    }
}

fn service_from_str<'de, D>(deserializer: D) -> Result<ServiceKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
}

fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CountVisitor)
}

struct CountVisitor;

impl<'de> Visitor<'de> for CountVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a horse count")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        Ok(i64::try_from(v).unwrap_or(i64::MAX))
    }

    // `as` truncates toward zero and saturates; NaN becomes 0.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        Ok(v as i64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        let trimmed = v.trim();
        trimmed
            .parse::<i64>()
            .or_else(|_| trimmed.parse::<f64>().map(|f| f as i64))
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

/// One response line.
///
/// ```json
/// {"ok":true,"view":{...}}
/// {"ok":true}                                   (after leave)
/// {"ok":false,"error":{"code":"...","message":"..."}}
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<FlowView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<Option<FlowView>, ApiError>> for CommandResponse {
    fn from(result: Result<Option<FlowView>, ApiError>) -> Self {
        match result {
            Ok(view) => CommandResponse {
                ok: true,
                view,
                error: None,
            },
            Err(error) => CommandResponse {
                ok: false,
                view: None,
                error: Some(error),
            },
        }
    }
}

/// Parses and executes one raw command line.
pub fn handle_line(state: &mut SessionState, config: &HostConfig, line: &str) -> CommandResponse {
    let result = serde_json::from_str::<BookingCommand>(line)
        .map_err(|e| ApiError::invalid_command(format!("Unrecognized command: {}", e)))
        .and_then(|command| execute(state, config, command));

    if let Err(ref e) = result {
        debug!(code = ?e.code, "Command rejected: {}", e.message);
    }

    result.into()
}

/// Executes a command against the session.
///
/// ## Returns
/// The view to render, or `None` after `leave`.
pub fn execute(
    state: &mut SessionState,
    config: &HostConfig,
    command: BookingCommand,
) -> Result<Option<FlowView>, ApiError> {
    debug!(?command, "booking command");

    let session = match command {
        BookingCommand::Start { service } => {
            let booking = config.booking_configuration(service)?;
            let (session, discarded) = state.start(booking);
            if let Some(previous) = discarded {
                info!(
                    session_id = %previous.id(),
                    open_secs = previous.open_seconds(Utc::now()),
                    "Discarding unfinished booking"
                );
            }
            info!(session_id = %session.id(), %service, "Booking started");
            return Ok(Some(FlowView::render(session, &config.currency)));
        }
        BookingCommand::Leave => {
            if let Some(closed) = state.leave() {
                info!(
                    session_id = %closed.id(),
                    open_secs = closed.open_seconds(Utc::now()),
                    completed = closed.machine().is_complete(),
                    "Booking closed"
                );
            }
            return Ok(None);
        }
        _ => state.current_mut()?,
    };

    if command.is_edit() && session.machine().is_complete() {
        debug!(session_id = %session.id(), "Summary is read-only, edit ignored");
    }

    apply(session, command)?;
    Ok(Some(FlowView::render(session, &config.currency)))
}

fn apply(session: &mut BookingSession, command: BookingCommand) -> Result<(), ApiError> {
    match command {
        BookingCommand::Next => {
            if session.update(|m| m.advance()) == FlowPosition::Summary {
                if let Some(summary) = session.summary() {
                    info!(
                        session_id = %session.id(),
                        reference = %summary.reference,
                        total = %summary.quote.total,
                        "Booking summary reached"
                    );
                }
            }
        }
        BookingCommand::Back => {
            session.update(|m| m.retreat());
        }
        BookingCommand::ReturnToEditing => {
            session.update(|m| m.return_to_editing());
        }
        BookingCommand::SetShrinkType { shrink_type } => {
            session.update(|m| m.set_shrink_type(shrink_type));
        }
        BookingCommand::SetFrequency { frequency } => {
            session.update(|m| m.set_frequency(frequency));
        }
        BookingCommand::SetHorseCount { count } => {
            session.update(|m| m.set_horse_count(count));
        }
        BookingCommand::IncrementHorses => {
            session.update(|m| m.increment_horse_count());
        }
        BookingCommand::DecrementHorses => {
            session.update(|m| m.decrement_horse_count());
        }
        BookingCommand::SetPreferredDate { date } => {
            let parsed = parse_preferred_date(date.as_deref().unwrap_or_default())?;
            session.update(|m| m.set_preferred_date(parsed));
        }
        BookingCommand::View | BookingCommand::Start { .. } | BookingCommand::Leave => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn run(state: &mut SessionState, line: &str) -> CommandResponse {
        handle_line(state, &HostConfig::default(), line)
    }

    fn view(state: &mut SessionState, line: &str) -> FlowView {
        let response = run(state, line);
        assert!(response.ok, "{line} failed: {:?}", response.error);
        response.view.unwrap()
    }

    #[test]
    fn test_command_parsing() {
        let cmd: BookingCommand = serde_json::from_str(r#"{"command":"start","service":"trimming"}"#).unwrap();
        assert_eq!(
            cmd,
            BookingCommand::Start {
                service: ServiceKind::Trimming
            }
        );

        let cmd: BookingCommand = serde_json::from_str(r#"{"command":"set_preferred_date"}"#).unwrap();
        assert_eq!(cmd, BookingCommand::SetPreferredDate { date: None });

        assert!(serde_json::from_str::<BookingCommand>(r#"{"command":"checkout"}"#).is_err());
    }

    #[test]
    fn test_service_is_case_insensitive() {
        let cmd: BookingCommand = serde_json::from_str(r#"{"command":"start","service":" Shrink "}"#).unwrap();
        assert_eq!(
            cmd,
            BookingCommand::Start {
                service: ServiceKind::Shrink
            }
        );
    }

    #[test]
    fn test_horse_count_is_read_leniently() {
        let count = |json: &str| match serde_json::from_str::<BookingCommand>(json).unwrap() {
            BookingCommand::SetHorseCount { count } => count,
            other => panic!("unexpected command {:?}", other),
        };

        assert_eq!(count(r#"{"command":"set_horse_count","count":4}"#), 4);
        assert_eq!(count(r#"{"command":"set_horse_count","count":4.7}"#), 4);
        assert_eq!(count(r#"{"command":"set_horse_count","count":-3}"#), -3);
        assert_eq!(count(r#"{"command":"set_horse_count","count":"6"}"#), 6);
        assert_eq!(count(r#"{"command":"set_horse_count","count":18446744073709551615}"#), i64::MAX);
        assert_eq!(count(r#"{"command":"set_horse_count","count":99999999999999999999}"#), i64::MAX);
        assert_eq!(count(r#"{"command":"set_horse_count","count":-1e30}"#), i64::MIN);

        assert!(serde_json::from_str::<BookingCommand>(r#"{"command":"set_horse_count","count":"many"}"#).is_err());
    }

    #[test]
    fn test_commands_need_a_session() {
        let mut state = SessionState::new();
        let response = run(&mut state, r#"{"command":"next"}"#);
        assert!(!response.ok);
        assert_eq!(response.error.unwrap().code, ErrorCode::NoActiveSession);
    }

    #[test]
    fn test_invalid_command() {
        let mut state = SessionState::new();
        let response = run(&mut state, "not json");
        assert_eq!(response.error.unwrap().code, ErrorCode::InvalidCommand);

        let response = run(&mut state, r#"{"command":"start","service":"grooming"}"#);
        assert_eq!(response.error.unwrap().code, ErrorCode::InvalidCommand);
    }

    #[test]
    fn test_trimming_booking() {
        let mut state = SessionState::new();

        let v = view(&mut state, r#"{"command":"start","service":"trimming"}"#);
        assert_eq!(v.current_step_index, 1);
        assert!(!v.can_retreat);

        view(&mut state, r#"{"command":"set_frequency","frequency":"annual"}"#);
        view(&mut state, r#"{"command":"next"}"#);
        let v = view(&mut state, r#"{"command":"set_horse_count","count":25}"#);
        assert_eq!(v.selections.horse_count.get(), 10);
        assert_eq!(v.price.total, "810.00 SAR");

        let v = view(&mut state, r#"{"command":"next"}"#);
        assert_eq!(v.position, FlowPosition::Summary);
        let reference = v.summary.unwrap().reference;

        // Edits in the summary are ignored and the reference is stable
        let v = view(&mut state, r#"{"command":"decrement_horses"}"#);
        assert_eq!(v.selections.horse_count.get(), 10);
        assert_eq!(v.summary.unwrap().reference, reference);

        let v = view(&mut state, r#"{"command":"return_to_editing"}"#);
        assert!(v.summary.is_none());
        assert!(v.can_retreat);
    }

    #[test]
    fn test_preferred_date() {
        let mut state = SessionState::new();
        view(&mut state, r#"{"command":"start","service":"shrink"}"#);

        let v = view(&mut state, r#"{"command":"set_preferred_date","date":"2025-03-03"}"#);
        assert!(v.selections.preferred_date.is_some());

        let response = run(&mut state, r#"{"command":"set_preferred_date","date":"3rd of March"}"#);
        assert_eq!(response.error.unwrap().code, ErrorCode::ValidationError);

        let v = view(&mut state, r#"{"command":"set_preferred_date","date":""}"#);
        assert_eq!(v.selections.preferred_date, None);
    }

    #[test]
    fn test_restart_and_leave() {
        let mut state = SessionState::new();
        let first = view(&mut state, r#"{"command":"start","service":"shrink"}"#);
        let second = view(&mut state, r#"{"command":"start","service":"trimming"}"#);
        assert_ne!(first.session_id, second.session_id);

        let response = run(&mut state, r#"{"command":"leave"}"#);
        assert!(response.ok);
        assert!(response.view.is_none());

        let response = run(&mut state, r#"{"command":"view"}"#);
        assert_eq!(response.error.unwrap().code, ErrorCode::NoActiveSession);
    }
}
