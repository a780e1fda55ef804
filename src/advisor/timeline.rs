use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::{slot_end_label, slot_start_label, DayTimeline, TimeSlot, SLOTS_PER_DAY};
use crate::error::AdvisorError;
use crate::providers::{SolarForecast, TariffInterval};

/// Zip the three collaborator series positionally into one aligned timeline.
/// The inputs are already validated and gap-filled by their collaborators;
/// anything other than 48 slots apiece is a contract violation.
pub fn compose_timeline(
    date: NaiveDate,
    solar: &SolarForecast,
    tariff: &[TariffInterval],
    consumption: &[Option<f64>],
) -> Result<DayTimeline> {
    for (name, len) in [
        ("solar", solar.intervals.len()),
        ("tariff", tariff.len()),
        ("consumption", consumption.len()),
    ] {
        if len != SLOTS_PER_DAY {
            return Err(AdvisorError::ContractViolation(format!(
                "{name} series has {len} slots, expected {SLOTS_PER_DAY}"
            ))
            .into());
        }
    }

    let slots = (0..SLOTS_PER_DAY)
        .map(|i| TimeSlot {
            index: i,
            start_time: slot_start_label(i),
            end_time: slot_end_label(i),
            solar_generation_kwh: solar.intervals[i].generation_kwh,
            consumption_kwh: consumption[i],
            price_per_kwh: tariff[i].price_per_kwh,
            period_name: tariff[i].period_name.clone(),
        })
        .collect();

    Ok(DayTimeline { date, slots })
}

/// Scalar prices derived from a composed day, used by the advice generators
/// for savings arithmetic. When a period never occurs that day the summary
/// falls back to day max (peak), day min (off-peak) or day mean (shoulder).
#[derive(Debug, Clone, Copy)]
pub struct PriceSummary {
    pub peak: f64,
    pub off_peak: f64,
    pub shoulder: f64,
    pub average: f64,
}

pub fn summarize_prices(slots: &[TimeSlot]) -> PriceSummary {
    if slots.is_empty() {
        return PriceSummary {
            peak: 0.0,
            off_peak: 0.0,
            shoulder: 0.0,
            average: 0.0,
        };
    }

    let average = slots.iter().map(|s| s.price_per_kwh).sum::<f64>() / slots.len() as f64;
    let first_price = |name: &str| {
        slots
            .iter()
            .find(|s| s.period_name == name)
            .map(|s| s.price_per_kwh)
    };
    let max = slots
        .iter()
        .map(|s| s.price_per_kwh)
        .fold(f64::MIN, f64::max);
    let min = slots
        .iter()
        .map(|s| s.price_per_kwh)
        .fold(f64::MAX, f64::min);

    PriceSummary {
        peak: first_price("peak").unwrap_or(max),
        off_peak: first_price("off-peak").unwrap_or(min),
        shoulder: first_price("shoulder").unwrap_or(average),
        average,
    }
}
