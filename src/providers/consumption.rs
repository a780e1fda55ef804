use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::domain::SLOTS_PER_DAY;

/// Fallback daily consumption when a user has no history, kWh/day.
pub const DEFAULT_AVG_DAILY_CONSUMPTION_KWH: f64 = 20.0;

/// Consumption collaborator. `day_profile` returns the gap-filled 48-slot
/// series for the date (`None` where the meter reported nothing);
/// `average_daily` is a trailing 7-day mean, defaulting to
/// [`DEFAULT_AVG_DAILY_CONSUMPTION_KWH`] when no history exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConsumptionProvider: Send + Sync {
    async fn day_profile(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<Option<f64>>>;
    async fn average_daily(&self, user_id: Uuid) -> Result<f64>;
}

/// Sim consumption: a flat base load with morning and evening bumps, a few
/// metering gaps, deterministic per date.
#[cfg(feature = "sim")]
pub struct SimulatedConsumptionProvider {
    pub baseline_kwh_per_day: f64,
}

#[cfg(feature = "sim")]
#[async_trait]
impl ConsumptionProvider for SimulatedConsumptionProvider {
    async fn day_profile(&self, _user_id: Uuid, date: NaiveDate) -> Result<Vec<Option<f64>>> {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(date.num_days_from_ce() as u64 ^ 0x636f6e73);
        let per_slot = self.baseline_kwh_per_day / SLOTS_PER_DAY as f64;

        Ok((0..SLOTS_PER_DAY)
            .map(|i| {
                // occasional metering gap
                if rng.gen_ratio(1, 16) {
                    return None;
                }
                let hour = i as f64 * 0.5;
                let bump = if (7.0..9.0).contains(&hour) {
                    1.8
                } else if (17.0..21.0).contains(&hour) {
                    2.4
                } else {
                    1.0
                };
                let noise: f64 = rng.gen_range(0.85..1.15);
                Some(per_slot * bump * noise)
            })
            .collect())
    }

    async fn average_daily(&self, _user_id: Uuid) -> Result<f64> {
        Ok(self.baseline_kwh_per_day)
    }
}
