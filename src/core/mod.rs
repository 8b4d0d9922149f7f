pub mod errors;
pub mod models;
pub mod utils;

pub use errors::KanaError;
pub use models::{
    parse_character_id,
    AttemptEvent,
    CharacterSpec,
    ExerciseMode,
    JudgedResult,
    Outcome,
    ScriptVariant,
};
pub use utils::{
    Clock,
    ManualClock,
    SystemClock,
};
