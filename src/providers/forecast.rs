use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{SolarConfig, SLOTS_PER_DAY};

/// One half-hour step of the generation forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastInterval {
    pub generation_kwh: f64,
}

/// 48-slot solar generation curve for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarForecast {
    pub intervals: Vec<ForecastInterval>,
}

impl SolarForecast {
    pub fn total_kwh(&self) -> f64 {
        self.intervals.iter().map(|i| i.generation_kwh).sum()
    }

    /// All-zero curve for households without panels.
    pub fn zero() -> Self {
        Self {
            intervals: (0..SLOTS_PER_DAY)
                .map(|_| ForecastInterval { generation_kwh: 0.0 })
                .collect(),
        }
    }
}

/// Forecast collaborator: the irradiance model itself is a black box; the
/// contract is a deterministic 48-slot curve for a given config + date.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SolarForecastProvider: Send + Sync {
    async fn generate_forecast(&self, config: &SolarConfig, date: NaiveDate)
        -> Result<SolarForecast>;
}

/// Deterministic simulated forecast: a daylight bell curve scaled by the
/// configured capacity, with a per-day cloud factor seeded from the date.
#[cfg(feature = "sim")]
pub struct SimulatedSolarForecast;

#[cfg(feature = "sim")]
#[async_trait]
impl SolarForecastProvider for SimulatedSolarForecast {
    async fn generate_forecast(
        &self,
        config: &SolarConfig,
        date: NaiveDate,
    ) -> Result<SolarForecast> {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(date.num_days_from_ce() as u64);
        let cloud_factor: f64 = rng.gen_range(0.55..1.0);

        let intervals = (0..SLOTS_PER_DAY)
            .map(|i| {
                let hour = i as f64 * 0.5 + 0.25;
                let generation_kwh = if (6.0..20.0).contains(&hour) {
                    let shape = (std::f64::consts::PI * (hour - 6.0) / 14.0).sin();
                    // kW * 0.5h, attenuated by the day's cloud cover
                    config.capacity_kw * shape * 0.5 * cloud_factor
                } else {
                    0.0
                };
                ForecastInterval { generation_kwh }
            })
            .collect();

        Ok(SolarForecast { intervals })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "sim")]
    #[tokio::test]
    async fn test_simulated_forecast_is_deterministic() {
        let config = SolarConfig {
            capacity_kw: 5.0,
            azimuth_degrees: 180.0,
        };
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let a = SimulatedSolarForecast
            .generate_forecast(&config, date)
            .await
            .unwrap();
        let b = SimulatedSolarForecast
            .generate_forecast(&config, date)
            .await
            .unwrap();
        assert_eq!(a.intervals.len(), SLOTS_PER_DAY);
        for (x, y) in a.intervals.iter().zip(&b.intervals) {
            assert_eq!(x.generation_kwh, y.generation_kwh);
        }
    }

    #[cfg(feature = "sim")]
    #[tokio::test]
    async fn test_simulated_forecast_is_dark_at_night() {
        let config = SolarConfig {
            capacity_kw: 5.0,
            azimuth_degrees: 180.0,
        };
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let forecast = SimulatedSolarForecast
            .generate_forecast(&config, date)
            .await
            .unwrap();
        assert_eq!(forecast.intervals[0].generation_kwh, 0.0);
        assert_eq!(forecast.intervals[47].generation_kwh, 0.0);
        assert!(forecast.intervals[26].generation_kwh > 0.0);
    }

    #[test]
    fn test_zero_forecast_totals_zero() {
        assert_eq!(SolarForecast::zero().total_kwh(), 0.0);
        assert_eq!(SolarForecast::zero().intervals.len(), SLOTS_PER_DAY);
    }
}
