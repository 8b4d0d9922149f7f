use super::messages;

/// Allowed difference between drawn and canonical stroke counts.
pub const STROKE_TOLERANCE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeCheck {
    pub expected: u32, // 0 means the character's strokes are not tracked
    pub observed: u32,
    pub matched: bool,
}

impl StrokeCheck {
    pub fn evaluate(expected: u32, observed: u32) -> Self {
        let matched = expected == 0 || expected.abs_diff(observed) <= STROKE_TOLERANCE;
        Self { expected, observed, matched }
    }

    /// Positive when too many strokes were drawn.
    pub fn delta(&self) -> i64 {
        i64::from(self.observed) - i64::from(self.expected)
    }

    pub fn message(&self) -> Option<String> {
        if self.matched {
            None
        } else {
            Some(messages::stroke_coaching(self.delta()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untracked_and_tolerance() {
        assert!(StrokeCheck::evaluate(0, 9).matched);
        assert!(StrokeCheck::evaluate(3, 3).matched);
        assert!(StrokeCheck::evaluate(3, 2).matched);
        assert!(StrokeCheck::evaluate(3, 4).matched);
        assert!(StrokeCheck::evaluate(1, 0).matched);
        assert!(StrokeCheck::evaluate(3, 0).message().is_some());
        assert_eq!(StrokeCheck::evaluate(3, 4).message(), None);
    }

    #[test]
    fn test_mismatch_states_exact_delta() {
        let too_many = StrokeCheck::evaluate(3, 5);
        assert!(!too_many.matched);
        assert_eq!(too_many.delta(), 2);
        let message = too_many.message().unwrap();
        assert!(message.contains('2'));
        assert!(message.contains("too many"));

        let too_few = StrokeCheck::evaluate(6, 2);
        assert_eq!(too_few.delta(), -4);
        let message = too_few.message().unwrap();
        assert!(message.contains('4'));
        assert!(message.contains("too few"));
    }
}
