use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::growth::GrowthLevel;
use crate::core::{
    ExerciseMode,
    Outcome,
};

/// Cumulative progress on one kana. The growth level is only ever recomputed
/// from the counters, never assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct MasteryRecord {
    character_id: String,
    discovered_at: DateTime<Utc>,
    writing_attempts: u32,
    writing_correct: u32,
    reading_attempts: u32,
    reading_correct: u32,
    growth_level: GrowthLevel,
    last_studied: DateTime<Utc>,
}

/// On-disk shape; the stored level is ignored and rederived on load.
#[derive(Deserialize)]
struct StoredRecord {
    character_id: String,
    discovered_at: DateTime<Utc>,
    writing_attempts: u32,
    writing_correct: u32,
    reading_attempts: u32,
    reading_correct: u32,
    last_studied: DateTime<Utc>,
}

impl From<StoredRecord> for MasteryRecord {
    fn from(stored: StoredRecord) -> Self {
        let mut record = MasteryRecord {
            character_id: stored.character_id,
            discovered_at: stored.discovered_at,
            writing_attempts: stored.writing_attempts,
            writing_correct: stored.writing_correct,
            reading_attempts: stored.reading_attempts,
            reading_correct: stored.reading_correct,
            growth_level: GrowthLevel::Unseen,
            last_studied: stored.last_studied,
        };
        record.recompute_level();
        record
    }
}

impl MasteryRecord {
    pub fn new(character_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            character_id: character_id.to_string(),
            discovered_at: now,
            writing_attempts: 0,
            writing_correct: 0,
            reading_attempts: 0,
            reading_correct: 0,
            growth_level: GrowthLevel::Unseen,
            last_studied: now,
        }
    }

    /// Count one answered exercise and rederive the growth level.
    pub fn count_attempt(&mut self, mode: ExerciseMode, outcome: Outcome, now: DateTime<Utc>) {
        let (attempts, correct) = match mode {
            ExerciseMode::Writing => (&mut self.writing_attempts, &mut self.writing_correct),
            ExerciseMode::Reading => (&mut self.reading_attempts, &mut self.reading_correct),
        };
        *attempts = attempts.saturating_add(1);
        if outcome.is_exact() {
            *correct = correct.saturating_add(1);
        }

        self.last_studied = now;
        self.recompute_level();
    }

    fn recompute_level(&mut self) {
        self.growth_level = GrowthLevel::from_totals(self.total_attempts(), self.total_correct());
    }

    pub fn character_id(&self) -> &str {
        &self.character_id
    }

    pub fn discovered_at(&self) -> DateTime<Utc> {
        self.discovered_at
    }

    pub fn last_studied(&self) -> DateTime<Utc> {
        self.last_studied
    }

    pub fn attempts(&self, mode: ExerciseMode) -> u32 {
        match mode {
            ExerciseMode::Writing => self.writing_attempts,
            ExerciseMode::Reading => self.reading_attempts,
        }
    }

    pub fn correct(&self, mode: ExerciseMode) -> u32 {
        match mode {
            ExerciseMode::Writing => self.writing_correct,
            ExerciseMode::Reading => self.reading_correct,
        }
    }

    pub fn total_attempts(&self) -> u32 {
        self.writing_attempts.saturating_add(self.reading_attempts)
    }

    pub fn total_correct(&self) -> u32 {
        self.writing_correct.saturating_add(self.reading_correct)
    }

    pub fn growth_level(&self) -> GrowthLevel {
        self.growth_level
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap()
    }

    #[test]
    fn test_count_attempt_per_mode() {
        let mut record = MasteryRecord::new("hiragana-a", at(0));
        assert_eq!(record.growth_level(), GrowthLevel::Unseen);

        record.count_attempt(ExerciseMode::Writing, Outcome::Exact, at(1));
        record.count_attempt(ExerciseMode::Writing, Outcome::Approximate, at(2));
        record.count_attempt(ExerciseMode::Reading, Outcome::Incorrect, at(3));

        assert_eq!(record.attempts(ExerciseMode::Writing), 2);
        assert_eq!(record.correct(ExerciseMode::Writing), 1);
        assert_eq!(record.attempts(ExerciseMode::Reading), 1);
        assert_eq!(record.correct(ExerciseMode::Reading), 0);
        assert_eq!(record.total_attempts(), 3);
        assert_eq!(record.growth_level(), GrowthLevel::FirstSteps);
        assert_eq!(record.discovered_at(), at(0));
        assert_eq!(record.last_studied(), at(3));
    }

    #[test]
    fn test_level_sums_both_modes() {
        let mut record = MasteryRecord::new("katakana-ka", at(0));
        for i in 0..5 {
            record.count_attempt(ExerciseMode::Writing, Outcome::Exact, at(i));
            record.count_attempt(ExerciseMode::Reading, Outcome::Incorrect, at(i));
        }
        assert_eq!(record.growth_level(), GrowthLevel::from_totals(10, 5));
        assert_eq!(record.growth_level(), GrowthLevel::Confident);
    }

    #[test]
    fn test_stale_stored_level_is_rederived() {
        let json = r#"{
            "character_id": "hiragana-i",
            "discovered_at": "2024-05-01T09:00:00Z",
            "writing_attempts": 5,
            "writing_correct": 0,
            "reading_attempts": 0,
            "reading_correct": 0,
            "growth_level": 5,
            "last_studied": "2024-05-01T09:10:00Z"
        }"#;
        let record: MasteryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.growth_level(), GrowthLevel::Practicing);

        let round_trip: MasteryRecord =
            serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
        assert_eq!(round_trip, record);
    }
}
