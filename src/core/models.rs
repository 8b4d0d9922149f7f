use std::{
    fmt,
    str::FromStr,
    time::Duration,
};

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;
use wana_kana::IsJapaneseStr;

use super::KanaError;

/// One of the two parallel kana scripts. Both share pronunciation but have
/// distinct glyphs and a distinct classifier label ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptVariant {
    Hiragana,
    Katakana,
}

impl ScriptVariant {
    pub const ALL: [ScriptVariant; 2] = [ScriptVariant::Hiragana, ScriptVariant::Katakana];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptVariant::Hiragana => "hiragana",
            ScriptVariant::Katakana => "katakana",
        }
    }

    /// Detect the script of a glyph. Mixed or non-kana text has no variant.
    pub fn of_glyph(glyph: &str) -> Option<Self> {
        if glyph.is_empty() {
            None
        } else if glyph.is_hiragana() {
            Some(ScriptVariant::Hiragana)
        } else if glyph.is_katakana() {
            Some(ScriptVariant::Katakana)
        } else {
            None
        }
    }
}

impl fmt::Display for ScriptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptVariant {
    type Err = KanaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hiragana" => Ok(ScriptVariant::Hiragana),
            "katakana" => Ok(ScriptVariant::Katakana),
            "" => Err(KanaError::InvalidInput("missing script variant".to_string())),
            other => Err(KanaError::InvalidInput(format!("unknown script variant '{}'", other))),
        }
    }
}

/// Production (drawing the glyph) vs. recognition of meaning (reading it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseMode {
    Writing,
    Reading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Exact,
    Approximate,
    Incorrect,
}

impl Outcome {
    pub fn is_exact(&self) -> bool {
        matches!(self, Outcome::Exact)
    }
}

/// Immutable reference data for one kana in one script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub id: String,              // "<variant>-<key>", e.g. "hiragana-ka"
    pub glyph: String,
    pub variant: ScriptVariant,
    pub romaji: String,          // Hepburn label shown to the learner
    pub row: String,             // Gojūon row the kana is taught in, e.g. "ka"
    pub stroke_count: u32,
}

/// Split a character id into its script and key, rejecting anything that is
/// not `<variant>-<lowercase ascii key>`.
pub fn parse_character_id(id: &str) -> Result<(ScriptVariant, &str), KanaError> {
    let (variant, key) = id.split_once('-').ok_or_else(|| {
        KanaError::InvalidInput(format!("malformed character id '{}': missing script prefix", id))
    })?;

    let variant = variant.parse::<ScriptVariant>()?;

    if key.is_empty() || !key.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(KanaError::InvalidInput(format!(
            "malformed character id '{}': key must be lowercase romaji",
            id
        )));
    }

    Ok((variant, key))
}

/// A single answered exercise. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptEvent {
    pub id: Uuid,
    pub character_id: String,
    pub mode: ExerciseMode,
    pub outcome: Outcome,
    pub elapsed_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl AttemptEvent {
    pub fn new(
        character_id: &str,
        mode: ExerciseMode,
        outcome: Outcome,
        elapsed: Duration,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            character_id: character_id.to_string(),
            mode,
            outcome,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            timestamp,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }
}

/// Result of judging one drawing. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgedResult {
    pub predicted: Option<String>,
    pub confidence: f32,
    pub is_correct: bool,
    pub stroke_count_match: bool,
    pub message: String,
}

impl JudgedResult {
    /// Map the judgement onto an attempt outcome. The expected glyph predicted
    /// below the confidence gate still counts as a near miss.
    pub fn outcome(&self, expected_glyph: &str) -> Outcome {
        if self.is_correct {
            Outcome::Exact
        } else if self.predicted.as_deref() == Some(expected_glyph) {
            Outcome::Approximate
        } else {
            Outcome::Incorrect
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_character_id() {
        let (variant, key) = parse_character_id("katakana-tsu").unwrap();
        assert_eq!(variant, ScriptVariant::Katakana);
        assert_eq!(key, "tsu");

        assert!(matches!(parse_character_id("ka"), Err(KanaError::InvalidInput(_))));
        assert!(matches!(parse_character_id("-ka"), Err(KanaError::InvalidInput(_))));
        assert!(matches!(parse_character_id("kanji-ka"), Err(KanaError::InvalidInput(_))));
        assert!(matches!(parse_character_id("hiragana-"), Err(KanaError::InvalidInput(_))));
        assert!(matches!(parse_character_id("hiragana-KA"), Err(KanaError::InvalidInput(_))));
    }

    #[test]
    fn test_script_variant_of_glyph() {
        assert_eq!(ScriptVariant::of_glyph("あ"), Some(ScriptVariant::Hiragana));
        assert_eq!(ScriptVariant::of_glyph("ア"), Some(ScriptVariant::Katakana));
        assert_eq!(ScriptVariant::of_glyph("a"), None);
        assert_eq!(ScriptVariant::of_glyph(""), None);
    }

    #[test]
    fn test_judged_result_outcome() {
        let mut result = JudgedResult {
            predicted: Some("あ".to_string()),
            confidence: 0.9,
            is_correct: true,
            stroke_count_match: true,
            message: String::new(),
        };
        assert_eq!(result.outcome("あ"), Outcome::Exact);

        result.is_correct = false;
        result.confidence = 0.4;
        assert_eq!(result.outcome("あ"), Outcome::Approximate);

        result.predicted = Some("お".to_string());
        assert_eq!(result.outcome("あ"), Outcome::Incorrect);

        result.predicted = None;
        assert_eq!(result.outcome("あ"), Outcome::Incorrect);
    }
}
