use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{label_to_end_minutes, label_to_minutes, SLOTS_PER_DAY};
use crate::error::AdvisorError;

/// One pricing period of a time-of-use tariff. Periods may wrap midnight
/// (start >= end means the period spans the day boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffPeriod {
    pub name: String,
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM"; "00:00" means end of day.
    pub end_time: String,
    pub price_per_kwh: f64,
}

/// A user's tariff structure as stored by the tariff collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffStructure {
    pub periods: Vec<TariffPeriod>,
}

impl TariffStructure {
    /// System default for users with no configured tariff: overnight
    /// off-peak, daytime shoulder, early-evening peak.
    pub fn default_structure() -> Self {
        Self {
            periods: vec![
                TariffPeriod {
                    name: "off-peak".to_string(),
                    start_time: "00:00".to_string(),
                    end_time: "07:00".to_string(),
                    price_per_kwh: 0.12,
                },
                TariffPeriod {
                    name: "shoulder".to_string(),
                    start_time: "07:00".to_string(),
                    end_time: "16:00".to_string(),
                    price_per_kwh: 0.20,
                },
                TariffPeriod {
                    name: "peak".to_string(),
                    start_time: "16:00".to_string(),
                    end_time: "20:00".to_string(),
                    price_per_kwh: 0.35,
                },
                TariffPeriod {
                    name: "shoulder".to_string(),
                    start_time: "20:00".to_string(),
                    end_time: "22:00".to_string(),
                    price_per_kwh: 0.20,
                },
                TariffPeriod {
                    name: "off-peak".to_string(),
                    start_time: "22:00".to_string(),
                    end_time: "00:00".to_string(),
                    price_per_kwh: 0.12,
                },
            ],
        }
    }
}

/// Price and period label for one half-hour slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffInterval {
    pub price_per_kwh: f64,
    pub period_name: String,
}

/// Project a tariff structure onto the 48 half-hour slots of a day. A slot
/// not covered by any period is a contract violation on the stored tariff.
pub fn map_to_intervals(
    structure: &TariffStructure,
    _date: NaiveDate,
) -> Result<Vec<TariffInterval>> {
    let mut intervals = Vec::with_capacity(SLOTS_PER_DAY);
    for slot_index in 0..SLOTS_PER_DAY {
        let slot_start = slot_index as u32 * 30;
        let period = structure
            .periods
            .iter()
            .find_map(|p| match period_contains(p, slot_start) {
                Ok(true) => Some(Ok(p)),
                Ok(false) => None,
                Err(e) => Some(Err(e)),
            })
            .transpose()?;
        match period {
            Some(p) => intervals.push(TariffInterval {
                price_per_kwh: p.price_per_kwh,
                period_name: p.name.clone(),
            }),
            None => {
                return Err(AdvisorError::ContractViolation(format!(
                    "tariff structure leaves slot {slot_index} uncovered"
                ))
                .into())
            }
        }
    }
    Ok(intervals)
}

fn period_contains(period: &TariffPeriod, minute_of_day: u32) -> Result<bool> {
    let start = label_to_minutes(&period.start_time)?;
    let end = label_to_end_minutes(&period.end_time)?;
    if start < end {
        Ok(minute_of_day >= start && minute_of_day < end)
    } else {
        // wraps midnight
        Ok(minute_of_day >= start || minute_of_day < end % 1440)
    }
}

/// Tariff collaborator: resolves the structure to price a user's day with,
/// falling back to the system default when nothing is configured.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TariffProvider: Send + Sync {
    async fn structure_for(&self, user_id: Uuid) -> Result<TariffStructure>;
}

/// Sim tariff: every user is on the default time-of-use structure, with
/// prices taken from configuration.
#[cfg(feature = "sim")]
pub struct SimulatedTariffProvider {
    structure: TariffStructure,
}

#[cfg(feature = "sim")]
impl SimulatedTariffProvider {
    pub fn new(off_peak: f64, shoulder: f64, peak: f64) -> Self {
        let mut structure = TariffStructure::default_structure();
        for period in &mut structure.periods {
            period.price_per_kwh = match period.name.as_str() {
                "off-peak" => off_peak,
                "peak" => peak,
                _ => shoulder,
            };
        }
        Self { structure }
    }
}

#[cfg(feature = "sim")]
#[async_trait]
impl TariffProvider for SimulatedTariffProvider {
    async fn structure_for(&self, _user_id: Uuid) -> Result<TariffStructure> {
        Ok(self.structure.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn test_default_structure_covers_all_slots() {
        let intervals = map_to_intervals(&TariffStructure::default_structure(), date()).unwrap();
        assert_eq!(intervals.len(), SLOTS_PER_DAY);
        assert_eq!(intervals[0].period_name, "off-peak");
        assert_eq!(intervals[13].period_name, "off-peak"); // 06:30
        assert_eq!(intervals[14].period_name, "shoulder"); // 07:00
        assert_eq!(intervals[32].period_name, "peak"); // 16:00
        assert_eq!(intervals[40].period_name, "shoulder"); // 20:00
        assert_eq!(intervals[44].period_name, "off-peak"); // 22:00
        assert_eq!(intervals[47].period_name, "off-peak");
    }

    #[test]
    fn test_gap_in_structure_is_a_contract_violation() {
        let structure = TariffStructure {
            periods: vec![TariffPeriod {
                name: "peak".to_string(),
                start_time: "16:00".to_string(),
                end_time: "20:00".to_string(),
                price_per_kwh: 0.35,
            }],
        };
        assert!(map_to_intervals(&structure, date()).is_err());
    }

    #[test]
    fn test_wrapping_period() {
        let structure = TariffStructure {
            periods: vec![
                TariffPeriod {
                    name: "day".to_string(),
                    start_time: "07:00".to_string(),
                    end_time: "22:00".to_string(),
                    price_per_kwh: 0.25,
                },
                TariffPeriod {
                    name: "night".to_string(),
                    start_time: "22:00".to_string(),
                    end_time: "07:00".to_string(),
                    price_per_kwh: 0.10,
                },
            ],
        };
        let intervals = map_to_intervals(&structure, date()).unwrap();
        assert_eq!(intervals[0].period_name, "night");
        assert_eq!(intervals[20].period_name, "day");
        assert_eq!(intervals[45].period_name, "night");
    }
}
