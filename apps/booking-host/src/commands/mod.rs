//! # Commands Module
//!
//! The command protocol between the booking UI and the host.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── booking.rs  ◄─── Command parsing and dispatch
//! └── view.rs     ◄─── FlowView rendering (steps, price panel, summary)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Booking UI writes one line:                                            │
//! │    {"command":"set_horse_count","count":4}                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  handle_line() ──► BookingCommand (serde) ──► execute()                 │
//! │                                                  │                      │
//! │                              SessionState ◄──────┤                      │
//! │                              BookingStateMachine ◄┘                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Host writes one line:                                                  │
//! │    {"ok":true,"view":{ step, progress, price, summary, ... }}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod booking;
pub mod view;

pub use booking::{execute, handle_line, BookingCommand, CommandResponse};
pub use view::FlowView;
