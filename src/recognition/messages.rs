//! Coaching messages shown after a drawing is judged.

use super::stroke::StrokeCheck;

pub const EXCEPTIONAL_CONFIDENCE: f32 = 0.8;
pub const POSITIVE_CONFIDENCE: f32 = 0.6;

pub const EXCEPTIONAL_PRAISE: &str = "Amazing! Beautifully written!";
pub const POSITIVE_PRAISE: &str = "Nicely written!";
pub const MILD_PRAISE: &str = "You wrote it!";
pub const ENCOURAGEMENT: &str = "Nicely written!";
pub const RETRY_PROMPT: &str = "Let's try writing it once more!";
pub const UNRECOGNIZED: &str = "Couldn't recognize that one. Let's try again!";

pub fn stroke_coaching(delta: i64) -> String {
    let strokes = delta.unsigned_abs();
    if delta > 0 {
        format!("That's {} strokes too many. Try removing {}.", strokes, strokes)
    } else {
        format!("That's {} strokes too few. Try adding {} more.", strokes, strokes)
    }
}

pub fn looks_like(predicted: &str) -> String {
    format!("That looks like 「{}」. Try again!", predicted)
}

pub fn praise(confidence: f32) -> &'static str {
    if confidence > EXCEPTIONAL_CONFIDENCE {
        EXCEPTIONAL_PRAISE
    } else if confidence > POSITIVE_CONFIDENCE {
        POSITIVE_PRAISE
    } else {
        MILD_PRAISE
    }
}

/// Pick the message for a classifier-backed judgement, once correctness is known.
pub fn select(
    is_correct: bool,
    confidence: f32,
    strokes: &StrokeCheck,
    predicted: Option<&str>,
    expected: &str,
) -> String {
    if is_correct {
        return praise(confidence).to_string();
    }

    if let Some(coaching) = strokes.message() {
        return coaching;
    }

    match predicted {
        Some(label) if label != expected => looks_like(label),
        _ => RETRY_PROMPT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_praise_tiers() {
        assert_eq!(praise(0.95), EXCEPTIONAL_PRAISE);
        assert_eq!(praise(0.8), POSITIVE_PRAISE);
        assert_eq!(praise(0.61), POSITIVE_PRAISE);
        assert_eq!(praise(0.6), MILD_PRAISE);
        assert_eq!(praise(0.51), MILD_PRAISE);
    }

    #[test]
    fn test_incorrect_message_priority() {
        let matched = StrokeCheck::evaluate(3, 3);
        let mismatched = StrokeCheck::evaluate(3, 6);

        // Stroke coaching wins over the classifier's guess
        let message = select(false, 0.9, &mismatched, Some("お"), "あ");
        assert!(message.contains("too many"));

        assert_eq!(select(false, 0.9, &matched, Some("お"), "あ"), looks_like("お"));
        assert_eq!(select(false, 0.3, &matched, Some("あ"), "あ"), RETRY_PROMPT);
        assert_eq!(select(false, 0.0, &matched, None, "あ"), RETRY_PROMPT);
        assert_eq!(select(true, 0.7, &mismatched, Some("あ"), "あ"), POSITIVE_PRAISE);
    }
}
