//! # State Module
//!
//! Host-side state: the active booking session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐        ┌────────────────────────────────────┐    │
//! │  │   HostConfig     │        │   SessionState                     │    │
//! │  │  (read-only,     │        │   Option<BookingSession>           │    │
//! │  │   loaded once)   │        │     ├── id, started_at             │    │
//! │  └──────────────────┘        │     ├── BookingStateMachine        │    │
//! │                              │     └── frozen BookingSummary      │    │
//! │                              └────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;

pub use session::{BookingSession, SessionState};
