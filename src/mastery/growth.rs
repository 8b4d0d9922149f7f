use serde::{
    Deserialize,
    Serialize,
};

use crate::core::KanaError;

/// Discrete mastery stage of one kana, derived from its attempt counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum GrowthLevel {
    Unseen = 0,
    FirstSteps = 1,
    Practicing = 2,
    Confident = 3,
    Mastered = 4,
    Perfect = 5,
}

/// (min total attempts, min total correct, level), strictest first.
const GROWTH_THRESHOLDS: [(u32, u32, GrowthLevel); 5] = [
    (20, 15, GrowthLevel::Perfect),
    (15, 10, GrowthLevel::Mastered),
    (10, 5, GrowthLevel::Confident),
    (5, 0, GrowthLevel::Practicing),
    (1, 0, GrowthLevel::FirstSteps),
];

impl GrowthLevel {
    pub const ALL: [GrowthLevel; 6] = [
        GrowthLevel::Unseen,
        GrowthLevel::FirstSteps,
        GrowthLevel::Practicing,
        GrowthLevel::Confident,
        GrowthLevel::Mastered,
        GrowthLevel::Perfect,
    ];

    pub fn from_totals(total_attempts: u32, total_correct: u32) -> Self {
        GROWTH_THRESHOLDS
            .iter()
            .find(|(attempts, correct, _)| total_attempts >= *attempts && total_correct >= *correct)
            .map(|(_, _, level)| *level)
            .unwrap_or(GrowthLevel::Unseen)
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl From<GrowthLevel> for u8 {
    fn from(level: GrowthLevel) -> Self {
        level.value()
    }
}

impl TryFrom<u8> for GrowthLevel {
    type Error = KanaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GrowthLevel::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| KanaError::InvalidInput(format!("growth level {} is out of range", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_table() {
        assert_eq!(GrowthLevel::from_totals(0, 0), GrowthLevel::Unseen);
        assert_eq!(GrowthLevel::from_totals(3, 3), GrowthLevel::FirstSteps);
        assert_eq!(GrowthLevel::from_totals(5, 0), GrowthLevel::Practicing);
        assert_eq!(GrowthLevel::from_totals(10, 5), GrowthLevel::Confident);
        assert_eq!(GrowthLevel::from_totals(15, 10), GrowthLevel::Mastered);
        assert_eq!(GrowthLevel::from_totals(20, 15), GrowthLevel::Perfect);
    }

    #[test]
    fn test_attempts_alone_do_not_promote() {
        assert_eq!(GrowthLevel::from_totals(100, 4), GrowthLevel::Practicing);
        assert_eq!(GrowthLevel::from_totals(100, 9), GrowthLevel::Confident);
        assert_eq!(GrowthLevel::from_totals(19, 19), GrowthLevel::Mastered);
        assert_eq!(GrowthLevel::from_totals(9, 9), GrowthLevel::Practicing);
    }

    #[test]
    fn test_level_is_monotonic_in_both_counters() {
        for attempts in 0..30 {
            for correct in 0..=attempts {
                let level = GrowthLevel::from_totals(attempts, correct);
                assert!(GrowthLevel::from_totals(attempts + 1, correct) >= level);
                if correct < attempts {
                    assert!(GrowthLevel::from_totals(attempts, correct + 1) >= level);
                }
            }
        }
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&GrowthLevel::Confident).unwrap(), "3");
        assert_eq!(serde_json::from_str::<GrowthLevel>("5").unwrap(), GrowthLevel::Perfect);
        assert!(serde_json::from_str::<GrowthLevel>("6").is_err());
    }
}
