use std::{
    sync::Arc,
    time::Duration,
};

use tokio::sync::RwLock;

use super::{
    locks::KeyedLocks,
    record::MasteryRecord,
    store::KanaStore,
};
use crate::core::{
    parse_character_id,
    AttemptEvent,
    CharacterSpec,
    Clock,
    ExerciseMode,
    JudgedResult,
    KanaError,
    Outcome,
    SystemClock,
};
use crate::kana::KanaCatalog;

/// Records answered exercises and keeps each kana's mastery record current.
pub struct MasteryEngine {
    store: Arc<dyn KanaStore>,
    clock: Arc<dyn Clock>,
    catalog: KanaCatalog,
    locks: KeyedLocks,
    // Attempts share it; reset takes it exclusively
    gate: RwLock<()>,
}

impl MasteryEngine {
    pub fn new(store: Arc<dyn KanaStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            catalog: KanaCatalog::standard(),
            locks: KeyedLocks::new(),
            gate: RwLock::new(()),
        }
    }

    pub fn with_system_clock(store: Arc<dyn KanaStore>) -> Self {
        Self::new(store, Arc::new(SystemClock))
    }

    pub fn store(&self) -> &Arc<dyn KanaStore> {
        &self.store
    }

    pub fn catalog(&self) -> &KanaCatalog {
        &self.catalog
    }

    fn validate(&self, character_id: &str) -> Result<&CharacterSpec, KanaError> {
        parse_character_id(character_id)?;
        self.catalog.get(character_id).ok_or_else(|| {
            KanaError::InvalidInput(format!("unknown character id '{}'", character_id))
        })
    }

    /// Log one attempt and update the character's record. Attempts on the same
    /// character are applied one at a time; the event and the updated record
    /// are written together or not at all. Ids outside the catalog are
    /// rejected before anything is read or written.
    pub async fn record_attempt(
        &self,
        character_id: &str,
        mode: ExerciseMode,
        outcome: Outcome,
        elapsed: Duration,
    ) -> Result<MasteryRecord, KanaError> {
        self.validate(character_id)?;

        let _session = self.gate.read().await;
        let _guard = self.locks.lock(character_id).await;
        let now = self.clock.now();

        let mut record = match self.store.get_record(character_id).await? {
            Some(record) => record,
            None => MasteryRecord::new(character_id, now),
        };
        let previous_level = record.growth_level();
        record.count_attempt(mode, outcome, now);

        let event = AttemptEvent::new(character_id, mode, outcome, elapsed, now);
        self.store.write_attempt(&event, &record).await?;

        tracing::debug!(
            character = character_id,
            ?mode,
            ?outcome,
            attempts = record.total_attempts(),
            correct = record.total_correct(),
            "attempt recorded"
        );
        if record.growth_level() != previous_level {
            tracing::info!(
                character = character_id,
                from = previous_level.value(),
                to = record.growth_level().value(),
                "growth level changed"
            );
        }

        Ok(record)
    }

    /// Record a judged drawing as a writing attempt.
    pub async fn record_judgement(
        &self,
        expected: &CharacterSpec,
        result: &JudgedResult,
        elapsed: Duration,
    ) -> Result<MasteryRecord, KanaError> {
        let outcome = result.outcome(&expected.glyph);
        self.record_attempt(&expected.id, ExerciseMode::Writing, outcome, elapsed).await
    }

    pub async fn record(&self, character_id: &str) -> Result<Option<MasteryRecord>, KanaError> {
        self.validate(character_id)?;
        self.store.get_record(character_id).await
    }

    pub async fn records(&self) -> Result<Vec<MasteryRecord>, KanaError> {
        self.store.all_records().await
    }

    /// Forget all progress: every event and every record. Waits for attempts
    /// already in flight, and attempts started meanwhile land after the clear.
    pub async fn reset(&self) -> Result<(), KanaError> {
        let _exclusive = self.gate.write().await;
        self.store.clear().await?;
        tracing::info!("all progress cleared");
        Ok(())
    }
}
