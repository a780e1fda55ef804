use anyhow::Result;
use chrono::Local;
use home_energy_advisor::advisor::AdvisorEngine;
use home_energy_advisor::config::Config;
use home_energy_advisor::domain::{ElectricVehicle, HomeBattery, SolarConfig};
use home_energy_advisor::providers::{
    InMemoryAssetProvider, InMemoryGridEventProvider, SimulatedConsumptionProvider,
    SimulatedSolarForecast, SimulatedTariffProvider,
};
use home_energy_advisor::telemetry::init_tracing;
use tracing::info;
use uuid::Uuid;

/// Demo entry point: run the advisor once for a simulated household and
/// print today's timeline and advice as JSON.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load().unwrap_or_default();

    let assets = InMemoryAssetProvider {
        evs: vec![ElectricVehicle {
            make: "Nissan".to_string(),
            model: "Leaf".to_string(),
            charging_speed_kw: 7.0,
            average_daily_miles: 70.0,
        }],
        batteries: vec![HomeBattery {
            power_kw: 5.0,
            capacity_kwh: 13.5,
        }],
        solar: Some(SolarConfig {
            capacity_kw: cfg.simulation.solar_capacity_kw,
            azimuth_degrees: 180.0,
        }),
    };

    let engine = AdvisorEngine::new(
        Box::new(SimulatedSolarForecast),
        Box::new(SimulatedTariffProvider::new(
            cfg.simulation.off_peak_price,
            cfg.simulation.shoulder_price,
            cfg.simulation.peak_price,
        )),
        Box::new(SimulatedConsumptionProvider {
            baseline_kwh_per_day: cfg.simulation.baseline_consumption_kwh_per_day,
        }),
        Box::new(assets),
        Box::new(InMemoryGridEventProvider::default()),
    );

    let user_id = Uuid::new_v4();
    let today = Local::now().date_naive();
    info!(%user_id, %today, "computing advice for simulated household");

    let timeline = engine.compute_timeline(user_id, today).await?;
    let advice = engine.compute_advice(user_id, today).await?;

    println!("{}", serde_json::to_string_pretty(&timeline)?);
    println!("{}", serde_json::to_string_pretty(&advice)?);

    Ok(())
}
