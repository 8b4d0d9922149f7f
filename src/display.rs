use std::fmt;

use crate::mastery::GrowthLevel;

impl GrowthLevel {
    pub fn icon(self) -> &'static str {
        match self {
            GrowthLevel::Unseen => "❓",
            GrowthLevel::FirstSteps => "🌱",
            GrowthLevel::Practicing => "🌿",
            GrowthLevel::Confident => "🌳",
            GrowthLevel::Mastered => "🌸",
            GrowthLevel::Perfect => "💮",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GrowthLevel::Unseen => "まだ",
            GrowthLevel::FirstSteps => "はじめて",
            GrowthLevel::Practicing => "れんしゅうちゅう",
            GrowthLevel::Confident => "とくい",
            GrowthLevel::Mastered => "マスター",
            GrowthLevel::Perfect => "かんぺき",
        }
    }
}

impl fmt::Display for GrowthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.label())
    }
}
