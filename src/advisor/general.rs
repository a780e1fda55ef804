use crate::domain::{round_savings, AdviceItem, GridEvent, Priority, TimeSlot};

use super::timeline::PriceSummary;
use super::window::find_best_surplus_window;

/// Energy assumed for one deferrable household task (dishwasher, dryer), kWh.
pub const ASSUMED_TASK_ENERGY_KWH: f64 = 1.5;

/// Slots before this index are "overnight" (before 07:00).
pub const OVERNIGHT_END_INDEX: usize = 14;

/// Household-level advice: grid events, the best solar-surplus window,
/// peak avoidance and the overnight off-peak run, in that order. Candidates
/// only; the ranker caps them later.
pub fn general_advice(
    slots: &[TimeSlot],
    prices: &PriceSummary,
    events: &[GridEvent],
) -> Vec<AdviceItem> {
    let mut items = Vec::new();

    for event in events {
        items.push(AdviceItem {
            title: format!("Grid event: {}", event.event_type),
            description: format!(
                "{} between {} and {} to earn the incentive.",
                event.incentive_description, event.start_time, event.end_time
            ),
            recommended_time_start: event.start_time.clone(),
            recommended_time_end: event.end_time.clone(),
            estimated_savings: round_savings(event.incentive_amount),
            priority: Priority::High,
        });
    }

    if let Some(window) = find_best_surplus_window(slots) {
        let start = &slots[window.start_index].start_time;
        let end = &slots[window.end_index].end_time;
        items.push(AdviceItem {
            title: "Use your solar surplus".to_string(),
            description: format!(
                "Run flexible appliances between {start} and {end} while your solar output \
                 exceeds household usage."
            ),
            recommended_time_start: start.clone(),
            recommended_time_end: end.clone(),
            estimated_savings: round_savings(window.total_surplus_kwh * prices.average),
            priority: Priority::High,
        });
    }

    if let Some(last_peak) = slots.iter().filter(|s| s.period_name == "peak").last() {
        items.push(AdviceItem {
            title: "Shift usage past the evening peak".to_string(),
            description: format!(
                "Defer energy-hungry tasks until after {}, when peak pricing ends.",
                last_peak.end_time
            ),
            recommended_time_start: last_peak.end_time.clone(),
            recommended_time_end: "00:00".to_string(),
            estimated_savings: round_savings(
                ASSUMED_TASK_ENERGY_KWH * (prices.peak - prices.off_peak),
            ),
            priority: Priority::High,
        });
    }

    let overnight: Vec<&TimeSlot> = slots
        .iter()
        .filter(|s| s.index < OVERNIGHT_END_INDEX && s.period_name == "off-peak")
        .collect();
    if let (Some(first), Some(last)) = (overnight.first(), overnight.last()) {
        items.push(AdviceItem {
            title: "Run appliances overnight".to_string(),
            description: format!(
                "Schedule the dishwasher or washing machine between {} and {} to use \
                 off-peak rates.",
                first.start_time, last.end_time
            ),
            recommended_time_start: first.start_time.clone(),
            recommended_time_end: last.end_time.clone(),
            estimated_savings: round_savings(
                ASSUMED_TASK_ENERGY_KWH * (prices.shoulder - prices.off_peak),
            ),
            priority: Priority::Medium,
        });
    }

    items
}
