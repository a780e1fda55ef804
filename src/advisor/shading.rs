use anyhow::Result;

use crate::domain::{GridEvent, ShadedInterval, Shading, TimeSlot, SLOTS_PER_DAY};

/// Event-independent classification of one slot.
///
/// The green checks run ahead of the yellow checks, so a nominally "peak"
/// slot with a solar surplus shades green. Preserved deliberately; changing
/// the order would be a behavior change, not a bug fix.
pub fn classify_slot(slot: &TimeSlot, avg_daily_consumption_kwh: f64) -> Shading {
    let per_slot_half_share = (avg_daily_consumption_kwh * 0.5) / SLOTS_PER_DAY as f64;
    let consumption = slot.consumption_kwh.unwrap_or(0.0);

    let cheap_and_quiet = slot.period_name == "off-peak" && consumption < per_slot_half_share;
    let solar_surplus = slot.solar_generation_kwh > consumption + 1.0;
    if cheap_and_quiet || solar_surplus {
        return Shading::Green;
    }

    let peak_period = slot.period_name == "peak";
    let dark_and_expensive = slot.solar_generation_kwh < 0.5 && slot.price_per_kwh > 0.20;
    if peak_period || dark_and_expensive {
        return Shading::Yellow;
    }

    Shading::None
}

/// Classify every slot of a day and apply the grid-event overlay: any slot
/// overlapping an active event is forced to red, while `base_shading` keeps
/// the event-independent signal for downstream consumers.
pub fn shade_timeline(
    slots: &[TimeSlot],
    avg_daily_consumption_kwh: f64,
    events: &[GridEvent],
) -> Result<Vec<ShadedInterval>> {
    slots
        .iter()
        .map(|slot| {
            let base_shading = classify_slot(slot, avg_daily_consumption_kwh);
            let mut shading = base_shading;
            for event in events {
                if event.overlaps(slot)? {
                    shading = Shading::Red;
                    break;
                }
            }
            Ok(ShadedInterval {
                slot: slot.clone(),
                base_shading,
                shading,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{slot_end_label, slot_start_label};
    use rstest::rstest;

    fn slot(index: usize, period: &str, solar: f64, consumption: Option<f64>, price: f64) -> TimeSlot {
        TimeSlot {
            index,
            start_time: slot_start_label(index),
            end_time: slot_end_label(index),
            solar_generation_kwh: solar,
            consumption_kwh: consumption,
            price_per_kwh: price,
            period_name: period.to_string(),
        }
    }

    #[rstest]
    // quiet off-peak slot: usage under half the typical per-slot share
    #[case(slot(2, "off-peak", 0.0, Some(0.1), 0.12), Shading::Green)]
    // off-peak but heavy usage, cheap price, no solar
    #[case(slot(2, "off-peak", 0.0, Some(0.9), 0.12), Shading::None)]
    // surplus beats the peak rule: green is checked first
    #[case(slot(33, "peak", 5.0, Some(1.0), 0.35), Shading::Green)]
    // plain peak slot
    #[case(slot(33, "peak", 0.0, Some(0.5), 0.35), Shading::Yellow)]
    // dark and expensive shoulder slot
    #[case(slot(40, "shoulder", 0.2, Some(0.5), 0.25), Shading::Yellow)]
    // dark but cheap
    #[case(slot(40, "shoulder", 0.2, Some(0.5), 0.18), Shading::None)]
    fn test_classification(#[case] slot: TimeSlot, #[case] expected: Shading) {
        assert_eq!(classify_slot(&slot, 20.0), expected);
    }

    #[test]
    fn test_missing_consumption_reads_as_zero() {
        // off-peak with no reading: 0.0 < (20 * 0.5) / 48
        let s = slot(2, "off-peak", 0.0, None, 0.12);
        assert_eq!(classify_slot(&s, 20.0), Shading::Green);
    }

    #[test]
    fn test_event_overlay_forces_red_and_preserves_base() {
        let slots = vec![
            slot(32, "shoulder", 1.0, Some(0.8), 0.18), // 16:00-16:30, base none
            slot(33, "shoulder", 1.0, Some(0.8), 0.18),
        ];
        let events = vec![GridEvent {
            start_time: "16:00".to_string(),
            end_time: "16:30".to_string(),
            event_type: "demand_response".to_string(),
            incentive_description: "reduce usage".to_string(),
            incentive_amount: 4.0,
        }];
        let shaded = shade_timeline(&slots, 20.0, &events).unwrap();
        assert_eq!(shaded[0].base_shading, Shading::None);
        assert_eq!(shaded[0].shading, Shading::Red);
        assert_eq!(shaded[1].shading, Shading::None);
    }
}
