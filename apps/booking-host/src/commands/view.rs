//! # Flow View
//!
//! What the booking UI renders after every command: the current step with
//! its choices, the progress indicator, the live price panel and, once the
//! wizard completes, the confirmation summary.
//!
//! Prices are formatted here with the configured currency; the core only
//! deals in amounts.

use chrono::{DateTime, Utc};
use sana_core::flow::ProgressMarker;
use sana_core::pricing::VOLUME_DISCOUNT_PERCENT;
use sana_core::summary::format_preferred_date;
use sana_core::validation::DATE_INPUT_FORMAT;
use sana_core::{
    BookingSelections, BookingSummary, FlowPosition, Frequency, PriceQuote, PricingEngine, ServiceKind,
    ShrinkType, Step, MAX_HORSE_COUNT, MIN_HORSE_COUNT, VOLUME_DISCOUNT_THRESHOLD,
};
use serde::Serialize;
use uuid::Uuid;

use crate::config::CurrencySettings;
use crate::state::BookingSession;

/// Full render state of one booking session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowView {
    pub session_id: Uuid,
    pub service_kind: ServiceKind,
    pub service_name: String,
    pub currency: String,
    pub position: FlowPosition,
    /// `None` while the summary shows.
    pub step: Option<StepView>,
    pub current_step_index: usize,
    pub total_steps: usize,
    pub can_retreat: bool,
    pub is_complete: bool,
    pub selections: BookingSelections,
    pub progress: Vec<ProgressMarker>,
    pub price: PriceView,
    pub summary: Option<SummaryView>,
}

impl FlowView {
    pub fn render(session: &BookingSession, currency: &CurrencySettings) -> Self {
        let machine = session.machine();
        let config = machine.config();
        let snapshot = machine.snapshot();

        let step = machine
            .current_step()
            .map(|step| StepView::render(step, &snapshot.selections));

        FlowView {
            session_id: session.id(),
            service_kind: config.service_kind(),
            service_name: config.service_name().to_string(),
            currency: currency.code.clone(),
            position: snapshot.position,
            step,
            current_step_index: snapshot.current_step_index,
            total_steps: snapshot.total_steps,
            can_retreat: snapshot.can_retreat,
            is_complete: snapshot.is_complete,
            price: PriceView::render(&snapshot.quote, snapshot.selections.shrink_type, currency),
            summary: session.summary().map(|s| SummaryView::render(s, currency)),
            selections: snapshot.selections,
            progress: snapshot.progress,
        }
    }
}

// =============================================================================
// Step
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub step: Step,
    /// 1-based number shown in the progress circle.
    pub number: usize,
    pub title: &'static str,
    pub content: StepContent,
}

/// Inputs of a step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepContent {
    ShrinkType {
        choices: Vec<Choice<ShrinkType>>,
    },
    Frequency {
        choices: Vec<Choice<Frequency>>,
    },
    #[serde(rename_all = "camelCase")]
    HorseCount {
        value: u8,
        min: u8,
        max: u8,
        can_increment: bool,
        can_decrement: bool,
        /// Shown under the counter once the volume discount applies.
        volume_discount_notice: Option<String>,
    },
    Date {
        /// `YYYY-MM-DD`, as the date picker expects it.
        value: Option<String>,
        /// `Selected date: Monday, March 3, 2025`; absent until a date is picked.
        label: Option<String>,
    },
}

/// One selectable card.
#[derive(Debug, Clone, Serialize)]
pub struct Choice<T> {
    pub value: T,
    pub label: &'static str,
    pub description: &'static str,
    pub selected: bool,
}

impl StepView {
    fn render(step: Step, selections: &BookingSelections) -> Self {
        let content = match step {
            Step::ShrinkTypeSelection => StepContent::ShrinkType {
                choices: ShrinkType::ALL
                    .iter()
                    .map(|&value| Choice {
                        value,
                        label: value.label(),
                        description: value.description(),
                        selected: value == selections.shrink_type,
                    })
                    .collect(),
            },
            Step::FrequencySelection => StepContent::Frequency {
                choices: Frequency::ALL
                    .iter()
                    .map(|&value| Choice {
                        value,
                        label: value.label(),
                        description: value.description(),
                        selected: value == selections.frequency,
                    })
                    .collect(),
            },
            Step::HorseCountSelection => {
                let count = selections.horse_count;
                StepContent::HorseCount {
                    value: count.get(),
                    min: MIN_HORSE_COUNT,
                    max: MAX_HORSE_COUNT,
                    can_increment: !count.is_max(),
                    can_decrement: !count.is_min(),
                    volume_discount_notice: PricingEngine::volume_discount_applies(count).then(|| {
                        format!(
                            "Volume discount: {}% off for booking {} or more horses!",
                            VOLUME_DISCOUNT_PERCENT, VOLUME_DISCOUNT_THRESHOLD
                        )
                    }),
                }
            }
            Step::DateSelection => StepContent::Date {
                value: selections
                    .preferred_date
                    .map(|d| d.format(DATE_INPUT_FORMAT).to_string()),
                label: selections
                    .preferred_date
                    .map(|d| format!("Selected date: {}", format_preferred_date(Some(d)))),
            },
        };

        StepView {
            step,
            number: step.index() + 1,
            title: step.title(),
            content,
        }
    }
}

// =============================================================================
// Price Panel
// =============================================================================

/// The live price panel.
///
/// ```text
/// Base price:                   150.00 SAR
/// Aluminum type adjustment:          +20%
/// Number of horses:                    x3
/// Annual plan discount:              -10%
/// ────────────────────────────────────────
/// Total:                        486.00 SAR
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceView {
    pub lines: Vec<PriceLine>,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceLine {
    pub label: String,
    pub value: String,
}

impl PriceLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        PriceLine {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl PriceView {
    pub fn render(quote: &PriceQuote, shrink_type: ShrinkType, currency: &CurrencySettings) -> Self {
        let b = &quote.breakdown;
        let mut lines = vec![PriceLine::new("Base price:", currency.format(b.base_price))];

        // Set only for non-Steel Shrink bookings
        if let Some(pct) = b.type_adjustment_percent {
            lines.push(PriceLine::new(
                format!("{} type adjustment:", shrink_type.label()),
                format!("+{}%", pct),
            ));
        }

        lines.push(PriceLine::new("Number of horses:", format!("x{}", b.horse_count)));

        if b.annual_discount_percent > 0 {
            lines.push(PriceLine::new(
                "Annual plan discount:",
                format!("-{}%", b.annual_discount_percent),
            ));
        }
        if b.volume_discount_percent > 0 {
            lines.push(PriceLine::new(
                "Volume discount:",
                format!("-{}%", b.volume_discount_percent),
            ));
        }

        PriceView {
            lines,
            total: currency.format(quote.total),
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// The "Booking Confirmed!" card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub reference: String,
    pub service: String,
    /// Shrink bookings only.
    pub shrink_type: Option<&'static str>,
    pub frequency: &'static str,
    pub horse_count: u8,
    pub preferred_date: String,
    pub total: String,
    pub confirmed_at: DateTime<Utc>,
}

impl SummaryView {
    pub fn render(summary: &BookingSummary, currency: &CurrencySettings) -> Self {
        SummaryView {
            reference: summary.reference.to_string(),
            service: summary.service_name.clone(),
            shrink_type: summary.shrink_type.map(|t| t.label()),
            frequency: summary.frequency.label(),
            horse_count: summary.horse_count.get(),
            preferred_date: format_preferred_date(summary.preferred_date),
            total: currency.format(summary.quote.total),
            confirmed_at: summary.confirmed_at,
        }
    }
}
