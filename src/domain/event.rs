use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::slot::{label_to_end_minutes, label_to_minutes, TimeSlot};

/// Grid event reported by the event collaborator (e.g. a demand-response
/// window with an incentive attached).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridEvent {
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM"; "00:00" means end of day.
    pub end_time: String,
    pub event_type: String,
    pub incentive_description: String,
    pub incentive_amount: f64,
}

impl GridEvent {
    /// Whether this event overlaps the given slot. Malformed time labels from
    /// the collaborator are a contract violation and surface as an error.
    pub fn overlaps(&self, slot: &TimeSlot) -> Result<bool> {
        let event_start = label_to_minutes(&self.start_time)?;
        let event_end = label_to_end_minutes(&self.end_time)?;
        let slot_start = slot.index as u32 * 30;
        let slot_end = slot_start + 30;
        Ok(event_start < slot_end && slot_start < event_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slot::{slot_end_label, slot_start_label};

    fn slot(index: usize) -> TimeSlot {
        TimeSlot {
            index,
            start_time: slot_start_label(index),
            end_time: slot_end_label(index),
            solar_generation_kwh: 0.0,
            consumption_kwh: Some(0.5),
            price_per_kwh: 0.2,
            period_name: "shoulder".to_string(),
        }
    }

    fn event(start: &str, end: &str) -> GridEvent {
        GridEvent {
            start_time: start.to_string(),
            end_time: end.to_string(),
            event_type: "demand_response".to_string(),
            incentive_description: "reduce usage".to_string(),
            incentive_amount: 5.0,
        }
    }

    #[test]
    fn test_overlap_inside_window() {
        let ev = event("16:00", "19:00");
        assert!(ev.overlaps(&slot(33)).unwrap()); // 16:30-17:00
        assert!(!ev.overlaps(&slot(31)).unwrap()); // 15:30-16:00
        assert!(!ev.overlaps(&slot(38)).unwrap()); // 19:00-19:30
    }

    #[test]
    fn test_overlap_until_midnight() {
        let ev = event("23:00", "00:00");
        assert!(ev.overlaps(&slot(47)).unwrap());
        assert!(!ev.overlaps(&slot(45)).unwrap());
    }

    #[test]
    fn test_malformed_label_is_an_error() {
        let ev = event("not-a-time", "19:00");
        assert!(ev.overlaps(&slot(0)).is_err());
    }
}
