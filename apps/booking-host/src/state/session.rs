//! # Booking Session State
//!
//! The one booking the host page currently drives.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  UI Action               Command                State Change            │
//! │  ─────────               ───────                ────────────            │
//! │                                                                         │
//! │  Open service page ────► start ───────────────► new BookingSession      │
//! │                                                 (old one discarded)     │
//! │                                                                         │
//! │  Next / Back / edits ──► next, back, set_* ───► machine mutated         │
//! │                                                                         │
//! │  Reach summary ────────► next ────────────────► summary frozen          │
//! │                                                 (reference, timestamp)  │
//! │                                                                         │
//! │  "Edit booking" ───────► return_to_editing ───► summary dropped         │
//! │                                                                         │
//! │  Leave page ───────────► leave ───────────────► session = None          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sessions are single-threaded and exclusively owned, so the state is a
//! plain `Option` without a lock.

use chrono::{DateTime, Utc};
use sana_core::{BookingConfiguration, BookingStateMachine, BookingSummary};
use uuid::Uuid;

use crate::error::ApiError;

/// One booking in progress.
#[derive(Debug, Clone)]
pub struct BookingSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    machine: BookingStateMachine,
    /// Frozen on entering the summary so the reference stays stable across
    /// repeated views.
    summary: Option<BookingSummary>,
}

impl BookingSession {
    pub fn new(config: BookingConfiguration) -> Self {
        BookingSession {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            machine: BookingStateMachine::new(config),
            summary: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whole seconds since the session started.
    pub fn open_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.started_at).num_seconds()
    }

    pub fn machine(&self) -> &BookingStateMachine {
        &self.machine
    }

    pub fn summary(&self) -> Option<&BookingSummary> {
        self.summary.as_ref()
    }

    /// Runs a mutation on the state machine, then freezes or drops the
    /// summary to match the machine's completion flag.
    pub fn update<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut BookingStateMachine) -> R,
    {
        let result = f(&mut self.machine);

        match (self.machine.is_complete(), self.summary.is_some()) {
            (true, false) => self.summary = self.machine.summary(),
            (false, true) => self.summary = None,
            _ => {}
        }

        result
    }
}

/// Host-owned slot for the active session.
#[derive(Debug, Default)]
pub struct SessionState {
    session: Option<BookingSession>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new booking, discarding any previous one.
    ///
    /// Returns the discarded session, if there was one.
    pub fn start(&mut self, config: BookingConfiguration) -> (&BookingSession, Option<BookingSession>) {
        let previous = self.session.take();
        let session = self.session.insert(BookingSession::new(config));
        (session, previous)
    }

    /// Closes the current booking, returning it if one was open.
    pub fn leave(&mut self) -> Option<BookingSession> {
        self.session.take()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_mut(&mut self) -> Result<&mut BookingSession, ApiError> {
        self.session.as_mut().ok_or_else(ApiError::no_active_session)
    }
}
