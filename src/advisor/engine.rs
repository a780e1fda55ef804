use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{
    AdviceBundle, ChargeableAsset, DayTimeline, ElectricVehicle, GridEvent, HomeBattery,
    SolarConfig, TimelineView,
};
use crate::providers::{
    AssetProvider, ConsumptionProvider, GridEventProvider, SolarForecast, SolarForecastProvider,
    TariffProvider,
};

use super::battery::battery_advice;
use super::ev::ev_advice;
use super::general::general_advice;
use super::rank::rank;
use super::shading::shade_timeline;
use super::status::{current_slot_index, narrate};
use super::timeline::{compose_timeline, summarize_prices};
use crate::providers::map_to_intervals;

/// The advice engine: pure interval analytics over data fetched from the
/// collaborator providers. No state is kept between requests.
pub struct AdvisorEngine {
    pub forecast: Box<dyn SolarForecastProvider>,
    pub tariff: Box<dyn TariffProvider>,
    pub consumption: Box<dyn ConsumptionProvider>,
    pub assets: Box<dyn AssetProvider>,
    pub events: Box<dyn GridEventProvider>,
}

impl AdvisorEngine {
    pub fn new(
        forecast: Box<dyn SolarForecastProvider>,
        tariff: Box<dyn TariffProvider>,
        consumption: Box<dyn ConsumptionProvider>,
        assets: Box<dyn AssetProvider>,
        events: Box<dyn GridEventProvider>,
    ) -> Self {
        Self {
            forecast,
            tariff,
            consumption,
            assets,
            events,
        }
    }

    /// Ranked, capped advice lists for one user and date.
    #[instrument(skip(self), fields(%user_id, %date))]
    pub async fn compute_advice(&self, user_id: Uuid, date: NaiveDate) -> Result<AdviceBundle> {
        let inputs = self.gather(user_id, date).await?;
        let prices = summarize_prices(&inputs.timeline.slots);

        let general = general_advice(&inputs.timeline.slots, &prices, &inputs.events);

        // The battery branch keys off tomorrow's forecast; only fetch it
        // when a battery is configured.
        let tomorrow_total = if inputs.batteries.is_empty() {
            0.0
        } else {
            let tomorrow = date.succ_opt().unwrap_or(date);
            let total = self
                .forecast
                .generate_forecast(&inputs.solar_config, tomorrow)
                .await?
                .total_kwh();
            debug!(tomorrow_total = total, "tomorrow's forecast total");
            total
        };

        let assets = inputs
            .evs
            .iter()
            .cloned()
            .map(ChargeableAsset::Ev)
            .chain(inputs.batteries.iter().cloned().map(ChargeableAsset::Battery));

        let mut ev_candidates = Vec::new();
        let mut battery_candidates = Vec::new();
        for asset in assets {
            match &asset {
                ChargeableAsset::Ev(ev) => {
                    ev_candidates.extend(ev_advice(ev, &inputs.timeline.slots, &prices));
                }
                ChargeableAsset::Battery(battery) => {
                    battery_candidates.extend(battery_advice(
                        battery,
                        &inputs.timeline.slots,
                        &prices,
                        tomorrow_total,
                    ));
                }
            }
        }

        let bundle = AdviceBundle {
            general: rank(general),
            ev: rank(ev_candidates),
            battery: rank(battery_candidates),
        };
        info!(
            general = bundle.general.len(),
            ev = bundle.ev.len(),
            battery = bundle.battery.len(),
            "advice computed"
        );
        Ok(bundle)
    }

    /// The classified 48-slot day plus, when `date` is today, the live
    /// status snapshot.
    pub async fn compute_timeline(&self, user_id: Uuid, date: NaiveDate) -> Result<TimelineView> {
        let now = Local::now();
        self.compute_timeline_at(user_id, date, now.date_naive(), now.time())
            .await
    }

    /// Timeline computation with the clock injected; `compute_timeline` is
    /// the wall-clock wrapper.
    #[instrument(skip(self), fields(%user_id, %date))]
    pub async fn compute_timeline_at(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        today: NaiveDate,
        time_of_day: NaiveTime,
    ) -> Result<TimelineView> {
        let inputs = self.gather(user_id, date).await?;
        let intervals = shade_timeline(
            &inputs.timeline.slots,
            inputs.avg_daily_consumption_kwh,
            &inputs.events,
        )?;

        let current_status = (date == today).then(|| {
            narrate(
                &intervals,
                current_slot_index(time_of_day),
                inputs.avg_daily_consumption_kwh,
            )
        });

        Ok(TimelineView {
            intervals,
            current_status,
        })
    }

    /// Resolve all collaborator data for one request and compose the day.
    /// Missing optional data falls back to documented defaults; provider
    /// failures propagate untouched.
    async fn gather(&self, user_id: Uuid, date: NaiveDate) -> Result<RequestInputs> {
        let solar_config = self
            .assets
            .solar_config(user_id)
            .await?
            .unwrap_or_else(SolarConfig::none);

        let solar = if solar_config.capacity_kw > 0.0 {
            self.forecast.generate_forecast(&solar_config, date).await?
        } else {
            SolarForecast::zero()
        };

        let structure = self.tariff.structure_for(user_id).await?;
        let tariff = map_to_intervals(&structure, date)?;
        let consumption = self.consumption.day_profile(user_id, date).await?;
        let avg_daily_consumption_kwh = self.consumption.average_daily(user_id).await?;

        let timeline = compose_timeline(date, &solar, &tariff, &consumption)?;
        let events = self.events.active_events(user_id, date).await?;
        let evs = self.assets.list_evs(user_id).await?;
        let batteries = self.assets.list_batteries(user_id).await?;

        Ok(RequestInputs {
            timeline,
            events,
            evs,
            batteries,
            solar_config,
            avg_daily_consumption_kwh,
        })
    }
}

/// Everything one request needs, resolved before any analytics run.
struct RequestInputs {
    timeline: DayTimeline,
    events: Vec<GridEvent>,
    evs: Vec<ElectricVehicle>,
    batteries: Vec<HomeBattery>,
    solar_config: SolarConfig,
    avg_daily_consumption_kwh: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{
        MockAssetProvider, MockConsumptionProvider, MockGridEventProvider,
        MockSolarForecastProvider, MockTariffProvider, TariffStructure,
    };
    use crate::domain::{Shading, SLOTS_PER_DAY};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    fn engine_without_assets() -> AdvisorEngine {
        let mut forecast = MockSolarForecastProvider::new();
        forecast
            .expect_generate_forecast()
            .returning(|_, _| Ok(SolarForecast::zero()));

        let mut tariff = MockTariffProvider::new();
        tariff
            .expect_structure_for()
            .returning(|_| Ok(TariffStructure::default_structure()));

        let mut consumption = MockConsumptionProvider::new();
        consumption
            .expect_day_profile()
            .returning(|_, _| Ok(vec![Some(0.3); SLOTS_PER_DAY]));
        consumption.expect_average_daily().returning(|_| Ok(20.0));

        let mut assets = MockAssetProvider::new();
        assets.expect_list_evs().returning(|_| Ok(Vec::new()));
        assets.expect_list_batteries().returning(|_| Ok(Vec::new()));
        assets.expect_solar_config().returning(|_| Ok(None));

        let mut events = MockGridEventProvider::new();
        events.expect_active_events().returning(|_, _| Ok(Vec::new()));

        AdvisorEngine::new(
            Box::new(forecast),
            Box::new(tariff),
            Box::new(consumption),
            Box::new(assets),
            Box::new(events),
        )
    }

    #[tokio::test]
    async fn test_no_assets_yields_empty_asset_advice() {
        let engine = engine_without_assets();
        let bundle = engine.compute_advice(Uuid::nil(), date()).await.unwrap();
        assert!(bundle.ev.is_empty());
        assert!(bundle.battery.is_empty());
        // general advice still exists for a plain tariff day
        assert!(!bundle.general.is_empty());
    }

    #[tokio::test]
    async fn test_timeline_for_another_day_has_no_status() {
        let engine = engine_without_assets();
        let view = engine
            .compute_timeline_at(
                Uuid::nil(),
                date(),
                date().succ_opt().unwrap(),
                NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(view.intervals.len(), SLOTS_PER_DAY);
        assert!(view.current_status.is_none());
    }

    #[tokio::test]
    async fn test_timeline_for_today_has_status() {
        let engine = engine_without_assets();
        let view = engine
            .compute_timeline_at(
                Uuid::nil(),
                date(),
                date(),
                NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            )
            .await
            .unwrap();
        let status = view.current_status.expect("status for today");
        assert_eq!(status.current_price, view.intervals[24].slot.price_per_kwh);
    }

    #[tokio::test]
    async fn test_wrong_length_consumption_fails() {
        let mut engine = engine_without_assets();
        let mut consumption = MockConsumptionProvider::new();
        consumption
            .expect_day_profile()
            .returning(|_, _| Ok(vec![Some(0.3); 47]));
        consumption.expect_average_daily().returning(|_| Ok(20.0));
        engine.consumption = Box::new(consumption);

        assert!(engine.compute_advice(Uuid::nil(), date()).await.is_err());
    }

    #[tokio::test]
    async fn test_shading_is_applied_to_the_timeline() {
        let engine = engine_without_assets();
        let view = engine
            .compute_timeline_at(
                Uuid::nil(),
                date(),
                date().succ_opt().unwrap(),
                NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            )
            .await
            .unwrap();
        // 0.3 kWh usage is above half the per-slot share (0.208), so overnight
        // off-peak slots shade none, and flat zero solar keeps midday plain
        assert_eq!(view.intervals[0].shading, Shading::None);
        // peak slots shade yellow
        assert_eq!(view.intervals[33].shading, Shading::Yellow);
    }
}
