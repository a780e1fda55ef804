use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
}

/// Knobs for the simulated collaborators behind the demo binary.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub solar_capacity_kw: f64,
    pub baseline_consumption_kwh_per_day: f64,
    pub off_peak_price: f64,
    pub shoulder_price: f64,
    pub peak_price: f64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("ADVISOR__").split("__"));
        Ok(figment.extract()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                solar_capacity_kw: 5.0,
                baseline_consumption_kwh_per_day: 18.0,
                off_peak_price: 0.12,
                shoulder_price: 0.20,
                peak_price: 0.35,
            },
        }
    }
}
