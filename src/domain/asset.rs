use serde::{Deserialize, Serialize};
use validator::Validate;

/// Electric vehicle as configured by the user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ElectricVehicle {
    pub make: String,
    pub model: String,
    #[validate(range(min = 0.1))]
    pub charging_speed_kw: f64,
    #[validate(range(min = 0.0))]
    pub average_daily_miles: f64,
}

impl ElectricVehicle {
    /// Display identity used in advice text.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// Stationary home battery.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HomeBattery {
    #[validate(range(min = 0.1))]
    pub power_kw: f64,
    #[validate(range(min = 0.1))]
    pub capacity_kwh: f64,
}

/// Closed set of chargeable assets; generators dispatch on the variant
/// rather than duck-typing field access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChargeableAsset {
    Ev(ElectricVehicle),
    Battery(HomeBattery),
}

/// User's rooftop solar configuration, as stored by the asset collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SolarConfig {
    #[validate(range(min = 0.0))]
    pub capacity_kw: f64,
    /// Panel azimuth in degrees from north; informational for the forecast.
    pub azimuth_degrees: f64,
}

impl SolarConfig {
    /// Configuration for a household with no panels: all-zero generation.
    pub fn none() -> Self {
        Self {
            capacity_kw: 0.0,
            azimuth_degrees: 0.0,
        }
    }
}
