use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// Number of fixed-width 30-minute slots in one calendar day.
pub const SLOTS_PER_DAY: usize = 48;

/// Minutes per slot.
pub const SLOT_MINUTES: u32 = 30;

/// One half-hour slot of the composed day, carrying the three input series
/// zipped together with the tariff period label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot index within the day, 0..48.
    pub index: usize,
    /// Inclusive start of the slot, "HH:MM".
    pub start_time: String,
    /// Exclusive end of the slot, "HH:MM"; slot 47 ends at "00:00".
    pub end_time: String,
    pub solar_generation_kwh: f64,
    /// `None` when the meter reported a gap for this slot.
    pub consumption_kwh: Option<f64>,
    pub price_per_kwh: f64,
    /// Tariff-defined label (e.g. "off-peak", "shoulder", "peak"); opaque here.
    pub period_name: String,
}

impl TimeSlot {
    /// Solar generation minus consumption, with gaps read as zero usage.
    pub fn surplus_kwh(&self) -> f64 {
        self.solar_generation_kwh - self.consumption_kwh.unwrap_or(0.0)
    }
}

/// Ordered sequence of exactly 48 slots for one calendar date. Immutable once
/// composed; owned by the request that built it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTimeline {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

/// "HH:MM" label for the start of slot `index`.
pub fn slot_start_label(index: usize) -> String {
    minutes_to_label((index as u32 * SLOT_MINUTES) % 1440)
}

/// "HH:MM" label for the end of slot `index`; the last slot wraps to "00:00".
pub fn slot_end_label(index: usize) -> String {
    minutes_to_label(((index as u32 + 1) * SLOT_MINUTES) % 1440)
}

fn minutes_to_label(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse an "HH:MM" label into minutes since midnight. "00:00" is ambiguous
/// between start-of-day and end-of-day; callers that mean end-of-day must
/// handle the wrap themselves (see [`label_to_end_minutes`]).
pub fn label_to_minutes(label: &str) -> Result<u32> {
    let (h, m) = label
        .split_once(':')
        .ok_or_else(|| AdvisorError::ContractViolation(format!("malformed time label {label:?}")))?;
    let hours: u32 = h
        .parse()
        .map_err(|_| AdvisorError::ContractViolation(format!("malformed time label {label:?}")))?;
    let minutes: u32 = m
        .parse()
        .map_err(|_| AdvisorError::ContractViolation(format!("malformed time label {label:?}")))?;
    if hours > 23 || minutes > 59 {
        return Err(AdvisorError::ContractViolation(format!("time label out of range {label:?}")).into());
    }
    Ok(hours * 60 + minutes)
}

/// Like [`label_to_minutes`], but "00:00" is read as 24:00 so that ranges
/// ending at midnight stay well-ordered.
pub fn label_to_end_minutes(label: &str) -> Result<u32> {
    let minutes = label_to_minutes(label)?;
    Ok(if minutes == 0 { 1440 } else { minutes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_labels_cover_the_day() {
        assert_eq!(slot_start_label(0), "00:00");
        assert_eq!(slot_end_label(0), "00:30");
        assert_eq!(slot_start_label(14), "07:00");
        assert_eq!(slot_start_label(47), "23:30");
        assert_eq!(slot_end_label(47), "00:00");
    }

    #[test]
    fn test_slot_labels_are_contiguous() {
        for i in 0..SLOTS_PER_DAY - 1 {
            assert_eq!(slot_end_label(i), slot_start_label(i + 1));
        }
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(label_to_minutes("00:00").unwrap(), 0);
        assert_eq!(label_to_minutes("16:30").unwrap(), 990);
        assert_eq!(label_to_end_minutes("00:00").unwrap(), 1440);
        assert!(label_to_minutes("25:00").is_err());
        assert!(label_to_minutes("banana").is_err());
    }

    #[test]
    fn test_surplus_reads_gaps_as_zero() {
        let slot = TimeSlot {
            index: 20,
            start_time: slot_start_label(20),
            end_time: slot_end_label(20),
            solar_generation_kwh: 3.0,
            consumption_kwh: None,
            price_per_kwh: 0.15,
            period_name: "shoulder".to_string(),
        };
        assert_eq!(slot.surplus_kwh(), 3.0);
    }
}
