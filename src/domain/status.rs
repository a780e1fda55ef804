use serde::{Deserialize, Serialize};
use strum::Display;

use super::slot::TimeSlot;

/// Coarse green/yellow/red/none classification of a slot for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Shading {
    Green,
    Yellow,
    Red,
    None,
}

/// A slot augmented with its qualitative classification. `base_shading` is
/// the event-independent signal; `shading` additionally applies the red
/// grid-event overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadedInterval {
    #[serde(flatten)]
    pub slot: TimeSlot,
    /// Event-independent classification; never `Red`.
    pub base_shading: Shading,
    pub shading: Shading,
}

/// Qualitative level for live solar/consumption state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

/// Live "right now" snapshot, derived only when the requested date is today.
/// Recomputed on every request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStatusSnapshot {
    pub solar_state: Level,
    pub consumption_state: Level,
    pub current_price: f64,
    /// One natural-language sentence of forward-looking guidance.
    pub action_prompt: String,
}

/// Response of the timeline operation: the classified day plus the live
/// snapshot when the date is today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineView {
    pub intervals: Vec<ShadedInterval>,
    pub current_status: Option<CurrentStatusSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shading_serialization() {
        assert_eq!(serde_json::to_string(&Shading::Green).unwrap(), "\"green\"");
        assert_eq!(serde_json::to_string(&Shading::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Medium.to_string(), "medium");
    }
}
