use crate::domain::{round_savings, AdviceItem, ElectricVehicle, Priority, TimeSlot};

use super::general::OVERNIGHT_END_INDEX;
use super::timeline::PriceSummary;
use super::window::{find_best_window, SURPLUS_THRESHOLD_KWH};

/// Assumed EV efficiency.
pub const MILES_PER_KWH: f64 = 3.5;

/// Midday slot range considered for solar charging: 10:00 (inclusive) to
/// 16:00 (exclusive).
pub const SOLAR_CHARGE_RANGE: std::ops::Range<usize> = 20..32;

/// Energy the vehicle needs per day, kWh.
pub fn daily_energy_needed_kwh(ev: &ElectricVehicle) -> f64 {
    ev.average_daily_miles / MILES_PER_KWH
}

/// Hours of charging per day at the vehicle's charger speed.
pub fn charging_hours_needed(ev: &ElectricVehicle) -> f64 {
    daily_energy_needed_kwh(ev) / ev.charging_speed_kw
}

/// Per-vehicle advice: an overnight off-peak charging window, and a midday
/// solar window when enough surplus slots exist.
pub fn ev_advice(ev: &ElectricVehicle, slots: &[TimeSlot], prices: &PriceSummary) -> Vec<AdviceItem> {
    let hours = charging_hours_needed(ev);
    let slots_needed = (hours * 2.0).ceil() as usize;
    if slots_needed == 0 {
        return Vec::new();
    }

    let daily_energy = daily_energy_needed_kwh(ev);
    let hours_rounded = (hours * 10.0).round() / 10.0;
    let mut items = Vec::new();

    let overnight: Vec<TimeSlot> = slots
        .iter()
        .filter(|s| s.index < OVERNIGHT_END_INDEX && s.period_name == "off-peak")
        .cloned()
        .collect();
    if !overnight.is_empty() {
        // fall back to the whole overnight range when fewer slots exist
        // than the charge needs
        let (start, end) = match find_best_window(&overnight, slots_needed) {
            Some(window) => (
                overnight[window.start_index].start_time.clone(),
                overnight[window.start_index + slots_needed - 1].end_time.clone(),
            ),
            None => (
                overnight[0].start_time.clone(),
                overnight[overnight.len() - 1].end_time.clone(),
            ),
        };
        items.push(AdviceItem {
            title: format!("Charge your {} overnight", ev.display_name()),
            description: format!(
                "Charge the {} for about {hours_rounded} hours between {start} and {end} \
                 at off-peak rates.",
                ev.display_name()
            ),
            recommended_time_start: start,
            recommended_time_end: end,
            estimated_savings: round_savings(daily_energy * (prices.peak - prices.off_peak)),
            priority: Priority::High,
        });
    }

    let solar: Vec<TimeSlot> = slots
        .iter()
        .filter(|s| SOLAR_CHARGE_RANGE.contains(&s.index) && s.surplus_kwh() > SURPLUS_THRESHOLD_KWH)
        .cloned()
        .collect();
    if solar.len() >= slots_needed {
        if let Some(window) = find_best_window(&solar, slots_needed) {
            let start = solar[window.start_index].start_time.clone();
            let end = solar[window.start_index + slots_needed - 1].end_time.clone();
            items.push(AdviceItem {
                title: format!("Charge your {} from solar", ev.display_name()),
                description: format!(
                    "Charge the {} between {start} and {end} while your panels are \
                     producing more than you use.",
                    ev.display_name()
                ),
                recommended_time_start: start,
                recommended_time_end: end,
                estimated_savings: round_savings(daily_energy * prices.average),
                priority: Priority::High,
            });
        }
    }

    items
}
