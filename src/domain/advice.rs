use serde::{Deserialize, Serialize};
use strum::Display;

/// Advice priority; ordering is load-bearing for the ranker
/// (`Low < Medium < High`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// One ranked recommendation. Created fresh per request by a generator and
/// immediately consumed by the ranker; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceItem {
    pub title: String,
    /// Must reference a concrete time window and, for asset advice, the
    /// asset's identity.
    pub description: String,
    /// "HH:MM"
    pub recommended_time_start: String,
    /// "HH:MM"
    pub recommended_time_end: String,
    /// Currency units, >= 0, rounded to 2 decimal places.
    pub estimated_savings: f64,
    pub priority: Priority,
}

/// The three independently ranked, capped advice lists for one user + date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdviceBundle {
    pub general: Vec<AdviceItem>,
    pub ev: Vec<AdviceItem>,
    pub battery: Vec<AdviceItem>,
}

/// Round a monetary amount to 2 decimal places, clamping at zero.
pub fn round_savings(amount: f64) -> f64 {
    (amount.max(0.0) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_priority_serialization() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(Priority::Medium.to_string(), "medium");
    }

    #[test]
    fn test_round_savings() {
        assert_eq!(round_savings(1.006), 1.01);
        assert_eq!(round_savings(2.344), 2.34);
        assert_eq!(round_savings(-0.5), 0.0);
    }
}
