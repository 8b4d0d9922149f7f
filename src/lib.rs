pub mod core;
pub mod display;
pub mod kana;
pub mod mastery;
pub mod persistence;
pub mod reading;
pub mod recognition;
pub mod settings;
pub mod stats;

pub use crate::core::{
    CharacterSpec,
    ExerciseMode,
    JudgedResult,
    KanaError,
    Outcome,
    ScriptVariant,
};
pub use kana::KanaCatalog;
pub use mastery::{
    GrowthLevel,
    MasteryEngine,
};
pub use recognition::RecognitionPipeline;
pub use settings::Settings;
pub use stats::StatisticsReporter;
