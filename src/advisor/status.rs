use chrono::NaiveTime;
use chrono::Timelike;

use crate::domain::{CurrentStatusSnapshot, Level, ShadedInterval, Shading, SLOTS_PER_DAY};

/// Number of slots the narrator looks ahead (3 hours).
pub const LOOK_AHEAD_SLOTS: usize = 6;

/// Slot index for a wall-clock time.
pub fn current_slot_index(time: NaiveTime) -> usize {
    (time.hour() as usize * 2 + usize::from(time.minute() >= 30)).min(SLOTS_PER_DAY - 1)
}

/// Solar level relative to the day's maximum generation (70% / 30%); low
/// when the day produces nothing at all.
pub fn solar_level(current_kwh: f64, day_max_kwh: f64) -> Level {
    if day_max_kwh <= 0.0 {
        Level::Low
    } else if current_kwh > day_max_kwh * 0.7 {
        Level::High
    } else if current_kwh > day_max_kwh * 0.3 {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Consumption level relative to the typical per-slot share (150% / 70%).
pub fn consumption_level(current_kwh: f64, avg_daily_kwh: f64) -> Level {
    let per_slot = avg_daily_kwh / SLOTS_PER_DAY as f64;
    if current_kwh > per_slot * 1.5 {
        Level::High
    } else if current_kwh > per_slot * 0.7 {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Everything a narration rule may look at, derived once up front.
struct NarratorContext {
    price: f64,
    shading: Shading,
    solar_state: Level,
    consumption_state: Level,
    day_max_generation: f64,
    /// Hours until the first yellow/red slot in the look-ahead.
    hours_to_congestion: Option<f64>,
    /// Hours until the first green slot in the look-ahead.
    hours_to_green: Option<f64>,
    look_ahead_max_price: Option<f64>,
    look_ahead_min_price: Option<f64>,
    hours_to_min_price: Option<f64>,
    look_ahead_min_generation: Option<f64>,
    look_ahead_mean_price: Option<f64>,
}

impl NarratorContext {
    fn build(
        intervals: &[ShadedInterval],
        current_index: usize,
        avg_daily_consumption_kwh: f64,
    ) -> Self {
        let current = &intervals[current_index];
        let day_max_generation = intervals
            .iter()
            .map(|i| i.slot.solar_generation_kwh)
            .fold(0.0, f64::max);

        let ahead_end = (current_index + 1 + LOOK_AHEAD_SLOTS).min(intervals.len());
        let look_ahead = &intervals[current_index + 1..ahead_end];

        let hours_at = |offset: usize| (offset + 1) as f64 * 0.5;
        let hours_to_congestion = look_ahead
            .iter()
            .position(|i| matches!(i.shading, Shading::Yellow | Shading::Red))
            .map(hours_at);
        let hours_to_green = look_ahead
            .iter()
            .position(|i| i.shading == Shading::Green)
            .map(hours_at);
        let prices = || look_ahead.iter().map(|i| i.slot.price_per_kwh);
        let look_ahead_max_price = prices().fold(None, |acc: Option<f64>, p| {
            Some(acc.map_or(p, |a| a.max(p)))
        });
        let look_ahead_min_price = prices().fold(None, |acc: Option<f64>, p| {
            Some(acc.map_or(p, |a| a.min(p)))
        });
        let hours_to_min_price = look_ahead_min_price.and_then(|min| {
            look_ahead
                .iter()
                .position(|i| i.slot.price_per_kwh == min)
                .map(hours_at)
        });
        let look_ahead_min_generation = look_ahead
            .iter()
            .map(|i| i.slot.solar_generation_kwh)
            .fold(None, |acc: Option<f64>, g| Some(acc.map_or(g, |a| a.min(g))));
        let look_ahead_mean_price = (!look_ahead.is_empty())
            .then(|| prices().sum::<f64>() / look_ahead.len() as f64);

        Self {
            price: current.slot.price_per_kwh,
            shading: current.shading,
            solar_state: solar_level(current.slot.solar_generation_kwh, day_max_generation),
            consumption_state: consumption_level(
                current.slot.consumption_kwh.unwrap_or(0.0),
                avg_daily_consumption_kwh,
            ),
            day_max_generation,
            hours_to_congestion,
            hours_to_green,
            look_ahead_max_price,
            look_ahead_min_price,
            hours_to_min_price,
            look_ahead_min_generation,
            look_ahead_mean_price,
        }
    }

    fn is_good(&self) -> bool {
        self.shading == Shading::Green || (self.solar_state == Level::High && self.price < 0.20)
    }

    fn is_bad(&self) -> bool {
        self.shading == Shading::Yellow || self.price >= 0.25
    }

    fn solar_declines_soon(&self) -> bool {
        self.look_ahead_min_generation
            .map(|min| min < self.day_max_generation * 0.3)
            .unwrap_or(false)
    }
}

type Predicate = fn(&NarratorContext) -> bool;
type MessageBuilder = fn(&NarratorContext) -> String;

/// The narration decision tree as an explicit ordered rule table, evaluated
/// top to bottom and short-circuited at the first match. The order is
/// semantically load-bearing: earlier rules mask later ones.
const RULES: &[(Predicate, MessageBuilder)] = &[
    // a. good now, congestion ahead
    (
        |ctx| ctx.is_good() && ctx.hours_to_congestion.is_some(),
        |ctx| {
            let hours = ctx.hours_to_congestion.unwrap_or(0.0);
            if hours <= 1.5 {
                format!(
                    "Conditions are good right now, but higher prices arrive in {hours:.1} \
                     hours - finish energy-hungry tasks soon."
                )
            } else {
                format!(
                    "A good time to use energy; prices rise in about {hours:.1} hours."
                )
            }
        },
    ),
    // b. high solar, low consumption
    (
        |ctx| ctx.solar_state == Level::High && ctx.consumption_state == Level::Low,
        |ctx| {
            if ctx.solar_declines_soon() {
                "Your solar is near its best but will fade within a few hours - run \
                 appliances now to use it."
                    .to_string()
            } else {
                "Your solar is producing strongly and will stay that way - a great time to \
                 turn things up."
                    .to_string()
            }
        },
    ),
    // c. bad now, relief ahead
    (
        |ctx| ctx.is_bad() && ctx.hours_to_green.is_some(),
        |ctx| {
            format!(
                "Prices are high right now - hold off if you can; conditions improve in \
                 about {:.1} hours.",
                ctx.hours_to_green.unwrap_or(0.0)
            )
        },
    ),
    // d. prices about to rise
    (
        |ctx| {
            !ctx.is_bad()
                && ctx
                    .look_ahead_max_price
                    .map(|max| max > ctx.price * 1.2)
                    .unwrap_or(false)
        },
        |_| "Prices rise by more than 20% over the next few hours - use energy now if you \
             were planning to."
            .to_string(),
    ),
    // e. expensive now
    (
        |ctx| ctx.price >= 0.25,
        |ctx| {
            let dips = ctx
                .look_ahead_min_price
                .map(|min| min < ctx.price * 0.8)
                .unwrap_or(false);
            if dips {
                format!(
                    "Electricity is expensive right now; prices drop in about {:.1} hours - \
                     defer what you can.",
                    ctx.hours_to_min_price.unwrap_or(0.0)
                )
            } else {
                "Electricity is expensive right now and staying that way - keep usage light."
                    .to_string()
            }
        },
    ),
    // f. high solar alone
    (
        |ctx| ctx.solar_state == Level::High,
        |_| "Your solar is producing well - energy you use now is effectively free.".to_string(),
    ),
    // g. green alone
    (
        |ctx| ctx.shading == Shading::Green,
        |ctx| {
            if ctx.hours_to_congestion.is_some() {
                "Conditions are good right now, though they worsen later - make the most of \
                 it."
                    .to_string()
            } else {
                "Conditions are good - run what you need.".to_string()
            }
        },
    ),
    // h. default, sub-branched on the look-ahead trend
    (
        |_| true,
        |ctx| match ctx.look_ahead_mean_price {
            Some(mean) if mean < ctx.price * 0.95 => {
                "Nothing urgent - conditions improve slightly later on.".to_string()
            }
            Some(mean) if mean > ctx.price * 1.05 => {
                "Nothing urgent, though prices creep up later - no need to wait.".to_string()
            }
            _ => "Steady conditions - no action needed right now.".to_string(),
        },
    ),
];

/// Produce the live snapshot for the current slot. Only meaningful when the
/// requested date is today; the engine guards that.
pub fn narrate(
    intervals: &[ShadedInterval],
    current_index: usize,
    avg_daily_consumption_kwh: f64,
) -> CurrentStatusSnapshot {
    let ctx = NarratorContext::build(intervals, current_index, avg_daily_consumption_kwh);
    let action_prompt = RULES
        .iter()
        .find(|(predicate, _)| predicate(&ctx))
        .map(|(_, builder)| builder(&ctx))
        .unwrap_or_default();

    CurrentStatusSnapshot {
        solar_state: ctx.solar_state,
        consumption_state: ctx.consumption_state,
        current_price: ctx.price,
        action_prompt,
    }
}
