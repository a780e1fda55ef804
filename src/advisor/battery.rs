use crate::domain::{round_savings, AdviceItem, HomeBattery, Priority, TimeSlot};

use super::general::OVERNIGHT_END_INDEX;
use super::timeline::PriceSummary;
use super::window::find_best_window;

/// Tomorrow's forecast total above this emits "reserve for solar" instead of
/// an overnight charge, kWh.
pub const SOLAR_RESERVE_THRESHOLD_KWH: f64 = 20.0;

/// Per-battery advice. The main branch keys off tomorrow's forecast total;
/// the pre-peak top-up is evaluated independently of it.
pub fn battery_advice(
    battery: &HomeBattery,
    slots: &[TimeSlot],
    prices: &PriceSummary,
    tomorrow_total_kwh: f64,
) -> Vec<AdviceItem> {
    let mut items = Vec::new();

    if tomorrow_total_kwh > SOLAR_RESERVE_THRESHOLD_KWH {
        let sunny: Vec<&TimeSlot> = slots
            .iter()
            .filter(|s| s.solar_generation_kwh > 1.0)
            .collect();
        if let (Some(first), Some(last)) = (sunny.first(), sunny.last()) {
            items.push(AdviceItem {
                title: "Reserve battery capacity for solar".to_string(),
                description: format!(
                    "Strong solar is forecast for tomorrow ({tomorrow_total_kwh:.0} kWh). Keep \
                     the {:.1} kWh battery free to soak up generation between {} and {}.",
                    battery.capacity_kwh, first.start_time, last.end_time
                ),
                recommended_time_start: first.start_time.clone(),
                recommended_time_end: last.end_time.clone(),
                estimated_savings: round_savings(
                    battery.capacity_kwh * (prices.peak - prices.average * 0.1),
                ),
                priority: Priority::High,
            });
        }
    } else {
        let hours = battery.capacity_kwh / battery.power_kw;
        let slots_needed = (hours * 2.0).ceil() as usize;
        let overnight: Vec<TimeSlot> = slots
            .iter()
            .filter(|s| s.index < OVERNIGHT_END_INDEX && s.period_name == "off-peak")
            .cloned()
            .collect();
        if !overnight.is_empty() && slots_needed > 0 {
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
                title: "Charge the battery overnight".to_string(),
                description: format!(
                    "Little solar is expected tomorrow. Charge the {:.1} kWh battery between \
                     {start} and {end} at off-peak rates to cover the evening peak.",
                    battery.capacity_kwh
                ),
                recommended_time_start: start,
                recommended_time_end: end,
                estimated_savings: round_savings(
                    battery.capacity_kwh * (prices.peak - prices.off_peak),
                ),
                priority: Priority::High,
            });
        }
    }

    if let Some(pre_charge) = pre_peak_top_up(battery, slots) {
        items.push(pre_charge);
    }

    items
}

/// "Pre-charge before peak": when a peak period starts at slot index >= 2 and
/// the price two hours earlier is strictly below the peak price, recommend
/// topping up over those four slots. Emits nothing otherwise.
fn pre_peak_top_up(battery: &HomeBattery, slots: &[TimeSlot]) -> Option<AdviceItem> {
    let peak_start = slots.iter().position(|s| s.period_name == "peak")?;
    if peak_start < 2 {
        return None;
    }
    let window_start = peak_start.saturating_sub(4);
    let pre_price = slots[window_start].price_per_kwh;
    let peak_price = slots[peak_start].price_per_kwh;
    if pre_price >= peak_price {
        return None;
    }

    Some(AdviceItem {
        title: "Top up the battery before the peak".to_string(),
        description: format!(
            "Charge the {:.1} kWh battery between {} and {} so it enters the peak period full.",
            battery.capacity_kwh, slots[window_start].start_time, slots[peak_start].start_time
        ),
        recommended_time_start: slots[window_start].start_time.clone(),
        recommended_time_end: slots[peak_start].start_time.clone(),
        estimated_savings: round_savings(battery.capacity_kwh * (peak_price - pre_price) * 0.5),
        priority: Priority::Medium,
    })
}
