//! # Booking Flow
//!
//! The wizard state machine: which step is showing, what the user picked,
//! and whether the booking has reached the read-only summary.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Booking Flow (Shrink)                            │
//! │                                                                         │
//! │  ┌────────────┐ advance ┌───────────┐ advance ┌──────────┐ advance      │
//! │  │ 0 Shrink   │───────► │1 Frequency│───────► │ 2 Horses │──────►...    │
//! │  │   Type     │ ◄───────│           │ ◄───────│          │              │
//! │  └────────────┘ retreat └───────────┘ retreat └──────────┘              │
//! │                                                                         │
//! │       ┌──────────┐  advance  ┌───────────┐                             │
//! │  ...─►│  3 Date  │─────────► │  SUMMARY  │ (read-only)                 │
//! │       │          │ ◄──────── │           │                             │
//! │       └──────────┘  return_  └───────────┘                             │
//! │                     to_editing                                          │
//! │                                                                         │
//! │  Trimming starts at 1, counts 3 steps, and summarizes after step 2.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! Every operation is total. Moving past the bounds is ignored, horse counts
//! are clamped, and nothing returns an error.
//!
//! ## Ownership
//! One machine per booking session, owned by whoever hosts that session.
//! No interior mutability and no locking.

use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use crate::pricing::{PriceQuote, PricingEngine};
use crate::summary::BookingSummary;
use crate::types::{BookingConfiguration, BookingSelections, Frequency, HorseCount, ShrinkType, Step};

// =============================================================================
// Position
// =============================================================================

/// Where the wizard is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "step", rename_all = "snake_case")]
pub enum FlowPosition {
    /// Showing an editable step.
    Editing(Step),
    /// Showing the read-only summary.
    Summary,
}

// =============================================================================
// Progress Indicator
// =============================================================================

/// State of one numbered circle in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStatus {
    /// Step the service kind does not have (Trimming's type step).
    Skipped,
    Completed,
    Current,
    Upcoming,
}

/// One numbered circle in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProgressMarker {
    pub index: usize,
    /// 1-based label.
    pub number: usize,
    pub step: Step,
    pub status: MarkerStatus,
}

// =============================================================================
// State Machine
// =============================================================================

/// The booking wizard for one session.
#[derive(Debug, Clone)]
pub struct BookingStateMachine {
    config: BookingConfiguration,
    selections: BookingSelections,
    current_step_index: usize,
    is_complete: bool,
}

impl BookingStateMachine {
    /// Starts a fresh booking on the kind's first step with default selections.
    pub fn new(config: BookingConfiguration) -> Self {
        let current_step_index = config.service_kind().first_step_index();
        BookingStateMachine {
            config,
            selections: BookingSelections::default(),
            current_step_index,
            is_complete: false,
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Moves to the next step, or into the summary from the last step.
    ///
    /// In the summary this stays in the summary.
    pub fn advance(&mut self) -> FlowPosition {
        if self.is_complete {
            return FlowPosition::Summary;
        }

        if self.current_step_index < self.total_steps() - 1 {
            self.current_step_index += 1;
        } else {
            self.is_complete = true;
        }

        self.position()
    }

    /// Moves to the previous step.
    ///
    /// No-op on the kind's first step and in the summary (use
    /// [`BookingStateMachine::return_to_editing`] there).
    pub fn retreat(&mut self) -> FlowPosition {
        if self.can_retreat() {
            self.current_step_index -= 1;
        }

        self.position()
    }

    /// Leaves the summary and resumes on the step that was showing before it.
    ///
    /// Selections are kept. No-op while editing.
    pub fn return_to_editing(&mut self) -> FlowPosition {
        self.is_complete = false;
        self.position()
    }

    // =========================================================================
    // Selection Changes
    // =========================================================================
    //
    // The summary is read-only: edits made while it shows are ignored.

    pub fn set_shrink_type(&mut self, shrink_type: ShrinkType) {
        if !self.is_complete {
            self.selections.shrink_type = shrink_type;
        }
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        if !self.is_complete {
            self.selections.frequency = frequency;
        }
    }

    /// Sets the horse count, clamping to 1..=10.
    pub fn set_horse_count(&mut self, count: i64) {
        if !self.is_complete {
            self.selections.horse_count = HorseCount::clamped(count);
        }
    }

    /// `+` button; no-op at 10.
    pub fn increment_horse_count(&mut self) {
        if !self.is_complete {
            self.selections.horse_count = self.selections.horse_count.increment();
        }
    }

    /// `-` button; no-op at 1.
    pub fn decrement_horse_count(&mut self) {
        if !self.is_complete {
            self.selections.horse_count = self.selections.horse_count.decrement();
        }
    }

    /// Sets or clears the preferred date.
    pub fn set_preferred_date(&mut self, date: Option<NaiveDate>) {
        if !self.is_complete {
            self.selections.preferred_date = date;
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> FlowPosition {
        match self.current_step() {
            Some(step) => FlowPosition::Editing(step),
            None => FlowPosition::Summary,
        }
    }

    /// The editable step showing, or `None` in the summary.
    pub fn current_step(&self) -> Option<Step> {
        if self.is_complete {
            return None;
        }
        Step::from_index(self.current_step_index)
    }

    /// Index of the current (or, in the summary, last shown) step.
    #[inline]
    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    #[inline]
    pub fn total_steps(&self) -> usize {
        self.config.service_kind().total_steps()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Whether a Back button should be offered.
    pub fn can_retreat(&self) -> bool {
        !self.is_complete && self.current_step_index > self.config.service_kind().first_step_index()
    }

    #[inline]
    pub fn config(&self) -> &BookingConfiguration {
        &self.config
    }

    #[inline]
    pub fn selections(&self) -> &BookingSelections {
        &self.selections
    }

    /// Prices the current selections.
    pub fn quote(&self) -> PriceQuote {
        PricingEngine::quote(&self.config, &self.selections)
    }

    /// Numbered progress indicator, one marker per counted step.
    pub fn progress(&self) -> Vec<ProgressMarker> {
        let kind = self.config.service_kind();

        (0..self.total_steps())
            .filter_map(|index| Step::from_index(index).map(|step| (index, step)))
            .map(|(index, step)| {
                let status = if !kind.has_step(step) {
                    MarkerStatus::Skipped
                } else if self.is_complete || index < self.current_step_index {
                    MarkerStatus::Completed
                } else if index == self.current_step_index {
                    MarkerStatus::Current
                } else {
                    MarkerStatus::Upcoming
                };

                ProgressMarker {
                    index,
                    number: index + 1,
                    step,
                    status,
                }
            })
            .collect()
    }

    /// Everything the rendering side needs after a change.
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            position: self.position(),
            current_step_index: self.current_step_index,
            total_steps: self.total_steps(),
            is_complete: self.is_complete,
            can_retreat: self.can_retreat(),
            selections: self.selections.clone(),
            progress: self.progress(),
            quote: self.quote(),
        }
    }

    /// Builds the confirmation payload with a fresh booking reference.
    ///
    /// `None` until the flow has reached the summary.
    pub fn summary(&self) -> Option<BookingSummary> {
        if !self.is_complete {
            return None;
        }
        Some(BookingSummary::new(&self.config, &self.selections, self.quote()))
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only view of the wizard handed to the rendering side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    pub position: FlowPosition,
    pub current_step_index: usize,
    pub total_steps: usize,
    pub is_complete: bool,
    pub can_retreat: bool,
    pub selections: BookingSelections,
    pub progress: Vec<ProgressMarker>,
    pub quote: PriceQuote,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ServiceKind;

    fn shrink_flow() -> BookingStateMachine {
        let config = BookingConfiguration::new(
            ServiceKind::Shrink,
            Money::from_major_minor(150, 0),
            "Shrink Services",
        )
        .unwrap();
        BookingStateMachine::new(config)
    }

    fn trimming_flow() -> BookingStateMachine {
        let config = BookingConfiguration::new(
            ServiceKind::Trimming,
            Money::from_major_minor(100, 0),
            "Trimming Services",
        )
        .unwrap();
        BookingStateMachine::new(config)
    }

    #[test]
    fn test_initial_state() {
        let shrink = shrink_flow();
        assert_eq!(shrink.current_step_index(), 0);
        assert_eq!(shrink.position(), FlowPosition::Editing(Step::ShrinkTypeSelection));
        assert!(!shrink.is_complete());

        let trimming = trimming_flow();
        assert_eq!(trimming.current_step_index(), 1);
        assert_eq!(trimming.position(), FlowPosition::Editing(Step::FrequencySelection));
    }

    #[test]
    fn test_shrink_walks_every_step() {
        let mut flow = shrink_flow();
        assert_eq!(flow.advance(), FlowPosition::Editing(Step::FrequencySelection));
        assert_eq!(flow.advance(), FlowPosition::Editing(Step::HorseCountSelection));
        assert_eq!(flow.advance(), FlowPosition::Editing(Step::DateSelection));
        assert_eq!(flow.advance(), FlowPosition::Summary);
        assert!(flow.is_complete());
        assert_eq!(flow.current_step_index(), 3);
    }

    #[test]
    fn test_trimming_summarizes_after_horse_count() {
        let mut flow = trimming_flow();
        assert_eq!(flow.advance(), FlowPosition::Editing(Step::HorseCountSelection));
        assert_eq!(flow.advance(), FlowPosition::Summary);
        assert_eq!(flow.current_step_index(), 2);
    }

    #[test]
    fn test_advance_in_summary_stays_put() {
        let mut flow = trimming_flow();
        flow.advance();
        flow.advance();
        assert_eq!(flow.advance(), FlowPosition::Summary);
        assert_eq!(flow.current_step_index(), 2);
    }

    #[test]
    fn test_retreat_respects_lower_bound() {
        let mut shrink = shrink_flow();
        assert!(!shrink.can_retreat());
        assert_eq!(shrink.retreat(), FlowPosition::Editing(Step::ShrinkTypeSelection));

        shrink.advance();
        assert!(shrink.can_retreat());
        assert_eq!(shrink.retreat(), FlowPosition::Editing(Step::ShrinkTypeSelection));

        let mut trimming = trimming_flow();
        assert!(!trimming.can_retreat());
        assert_eq!(trimming.retreat(), FlowPosition::Editing(Step::FrequencySelection));
        assert_eq!(trimming.current_step_index(), 1);
    }

    #[test]
    fn test_retreat_in_summary_is_ignored() {
        let mut flow = trimming_flow();
        flow.advance();
        flow.advance();

        assert!(!flow.can_retreat());
        assert_eq!(flow.retreat(), FlowPosition::Summary);
        assert_eq!(flow.current_step_index(), 2);
    }

    #[test]
    fn test_return_to_editing_resumes_last_step() {
        let mut flow = shrink_flow();
        flow.set_frequency(Frequency::Annual);
        for _ in 0..4 {
            flow.advance();
        }

        assert_eq!(flow.return_to_editing(), FlowPosition::Editing(Step::DateSelection));
        assert_eq!(flow.selections().frequency, Frequency::Annual);
        assert_eq!(flow.advance(), FlowPosition::Summary);
    }

    #[test]
    fn test_return_to_editing_outside_summary_is_noop() {
        let mut flow = shrink_flow();
        flow.advance();
        assert_eq!(flow.return_to_editing(), FlowPosition::Editing(Step::FrequencySelection));
    }

    #[test]
    fn test_horse_count_counter_clamps() {
        let mut flow = trimming_flow();
        for _ in 0..50 {
            flow.increment_horse_count();
        }
        assert_eq!(flow.selections().horse_count.get(), 10);

        for _ in 0..50 {
            flow.decrement_horse_count();
        }
        assert_eq!(flow.selections().horse_count.get(), 1);

        flow.set_horse_count(42);
        assert_eq!(flow.selections().horse_count.get(), 10);
        flow.set_horse_count(-3);
        assert_eq!(flow.selections().horse_count.get(), 1);
    }

    #[test]
    fn test_summary_is_read_only() {
        let mut flow = trimming_flow();
        flow.advance();
        flow.advance();

        flow.set_frequency(Frequency::Annual);
        flow.set_horse_count(5);
        flow.set_preferred_date(NaiveDate::from_ymd_opt(2025, 3, 3));

        assert_eq!(flow.selections(), &BookingSelections::default());
    }

    #[test]
    fn test_live_quote_follows_selections() {
        let mut flow = shrink_flow();
        assert_eq!(flow.quote().total, Money::from_minor(15000));

        flow.set_shrink_type(ShrinkType::Aluminum);
        flow.set_horse_count(2);
        assert_eq!(flow.quote().total, Money::from_minor(36000));
    }

    #[test]
    fn test_progress_markers() {
        let mut flow = trimming_flow();
        let statuses: Vec<_> = flow.progress().iter().map(|m| m.status).collect();
        assert_eq!(
            statuses,
            vec![MarkerStatus::Skipped, MarkerStatus::Current, MarkerStatus::Upcoming]
        );

        flow.advance();
        flow.advance();
        let statuses: Vec<_> = flow.progress().iter().map(|m| m.status).collect();
        assert_eq!(
            statuses,
            vec![MarkerStatus::Skipped, MarkerStatus::Completed, MarkerStatus::Completed]
        );

        let shrink = shrink_flow();
        let markers = shrink.progress();
        assert_eq!(markers.len(), 4);
        assert_eq!(markers[0].number, 1);
        assert_eq!(markers[0].status, MarkerStatus::Current);
        assert_eq!(markers[3].step, Step::DateSelection);
    }

    #[test]
    fn test_snapshot_and_summary() {
        let mut flow = shrink_flow();
        let snapshot = flow.snapshot();
        assert_eq!(snapshot.total_steps, 4);
        assert!(!snapshot.can_retreat);
        assert!(flow.summary().is_none());

        for _ in 0..4 {
            flow.advance();
        }
        let snapshot = flow.snapshot();
        assert_eq!(snapshot.position, FlowPosition::Summary);
        assert!(snapshot.is_complete);

        let summary = flow.summary().unwrap();
        assert_eq!(summary.quote, flow.quote());
        assert_eq!(summary.service_name, "Shrink Services");
    }

    #[test]
    fn test_snapshot_json_shape() {
        let flow = trimming_flow();
        let json = serde_json::to_value(flow.snapshot()).unwrap();

        assert_eq!(json["position"]["kind"], "editing");
        assert_eq!(json["position"]["step"], "frequency_selection");
        assert_eq!(json["currentStepIndex"], 1);
        assert_eq!(json["selections"]["horseCount"], 1);
        assert_eq!(json["selections"]["frequency"], "one_time");
    }
}
