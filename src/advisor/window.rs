use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::domain::TimeSlot;

/// Surplus below or at this threshold closes a solar-surplus run, kWh.
pub const SURPLUS_THRESHOLD_KWH: f64 = 2.0;

/// Best contiguous window of `window_len` positions within a candidate list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMatch {
    /// Position within the candidate list (not the day) where the window starts.
    pub start_index: usize,
    /// Mean price per kWh over the window.
    pub score: f64,
}

/// Slide a window of `window_len` contiguous positions across `candidates`
/// (already pre-filtered to an eligible sub-range) and return the position
/// with the minimum mean `price_per_kwh`. Ties go to the lowest start index.
/// Returns `None` when fewer candidates than `window_len` exist; the caller
/// falls back to the full available range.
pub fn find_best_window(candidates: &[TimeSlot], window_len: usize) -> Option<WindowMatch> {
    if window_len == 0 || candidates.len() < window_len {
        return None;
    }

    (0..=candidates.len() - window_len)
        .map(|start| {
            let mean = candidates[start..start + window_len]
                .iter()
                .map(|s| s.price_per_kwh)
                .sum::<f64>()
                / window_len as f64;
            (start, mean)
        })
        .min_by_key(|&(_, mean)| OrderedFloat(mean))
        .map(|(start_index, score)| WindowMatch {
            start_index,
            score,
        })
}

/// A closed run of consecutive slots whose solar surplus stayed above the
/// threshold. Indices are day slot indices, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurplusWindow {
    pub start_index: usize,
    pub end_index: usize,
    pub total_surplus_kwh: f64,
}

/// Scan the full day left to right, accumulating consecutive slots where the
/// surplus exceeds [`SURPLUS_THRESHOLD_KWH`]; a run still open at the last
/// slot is closed and included. Returns the run with the maximum summed
/// surplus, earliest run winning ties.
pub fn find_best_surplus_window(slots: &[TimeSlot]) -> Option<SurplusWindow> {
    let runs = slots
        .iter()
        .chunk_by(|s| s.surplus_kwh() > SURPLUS_THRESHOLD_KWH);

    let mut best: Option<SurplusWindow> = None;
    for (has_surplus, run) in &runs {
        if !has_surplus {
            continue;
        }
        let mut candidate: Option<SurplusWindow> = None;
        for slot in run {
            let window = candidate.get_or_insert(SurplusWindow {
                start_index: slot.index,
                end_index: slot.index,
                total_surplus_kwh: 0.0,
            });
            window.end_index = slot.index;
            window.total_surplus_kwh += slot.surplus_kwh();
        }
        if let Some(candidate) = candidate {
            if best
                .map(|b| candidate.total_surplus_kwh > b.total_surplus_kwh)
                .unwrap_or(true)
            {
                best = Some(candidate);
            }
        }
    }
    best
}
