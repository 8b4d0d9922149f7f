use std::{
    collections::BTreeMap,
    sync::Mutex,
};

use async_trait::async_trait;
use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::record::MasteryRecord;
use crate::core::{
    AttemptEvent,
    KanaError,
};

/// Storage contract shared by the mastery engine and the statistics reporter.
#[async_trait]
pub trait KanaStore: Send + Sync {
    async fn get_record(&self, character_id: &str) -> Result<Option<MasteryRecord>, KanaError>;

    async fn put_record(&self, record: &MasteryRecord) -> Result<(), KanaError>;

    async fn all_records(&self) -> Result<Vec<MasteryRecord>, KanaError>;

    async fn append_event(&self, event: &AttemptEvent) -> Result<(), KanaError>;

    /// Append `event` and upsert `record` as one unit: either both are stored or neither.
    async fn write_attempt(
        &self,
        event: &AttemptEvent,
        record: &MasteryRecord,
    ) -> Result<(), KanaError>;

    /// Events at or after `since` (all events when `None`), oldest first.
    async fn events_since(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AttemptEvent>, KanaError>;

    async fn event_count(&self) -> Result<usize, KanaError>;

    /// Delete every event and every record.
    async fn clear(&self) -> Result<(), KanaError>;
}

pub const SNAPSHOT_VERSION: u32 = 1;

/// Both tables, as held in memory and as written to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default = "snapshot_version")]
    pub version: u32,
    pub events: Vec<AttemptEvent>,
    pub records: BTreeMap<String, MasteryRecord>,
}

fn snapshot_version() -> u32 {
    SNAPSHOT_VERSION
}

impl StoreSnapshot {
    pub fn new() -> Self {
        Self { version: SNAPSHOT_VERSION, ..Self::default() }
    }

    pub fn get_record(&self, character_id: &str) -> Option<MasteryRecord> {
        self.records.get(character_id).cloned()
    }

    pub fn put_record(&mut self, record: &MasteryRecord) {
        self.records.insert(record.character_id().to_string(), record.clone());
    }

    pub fn append_event(&mut self, event: &AttemptEvent) {
        self.events.push(event.clone());
    }

    pub fn events_since(&self, since: Option<DateTime<Utc>>) -> Vec<AttemptEvent> {
        let mut events: Vec<AttemptEvent> = self
            .events
            .iter()
            .filter(|event| since.map_or(true, |since| event.timestamp >= since))
            .cloned()
            .collect();
        events.sort_by_key(|event| event.timestamp);
        events
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.records.clear();
    }
}

/// Non-durable store, for tests and for sessions that should not be saved.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<StoreSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { snapshot: Mutex::new(StoreSnapshot::new()) }
    }

    fn with_snapshot<T>(&self, f: impl FnOnce(&mut StoreSnapshot) -> T) -> Result<T, KanaError> {
        let mut snapshot = self
            .snapshot
            .lock()
            .map_err(|_| KanaError::Persistence("memory store lock poisoned".to_string()))?;
        Ok(f(&mut snapshot))
    }
}

#[async_trait]
impl KanaStore for MemoryStore {
    async fn get_record(&self, character_id: &str) -> Result<Option<MasteryRecord>, KanaError> {
        self.with_snapshot(|s| s.get_record(character_id))
    }

    async fn put_record(&self, record: &MasteryRecord) -> Result<(), KanaError> {
        self.with_snapshot(|s| s.put_record(record))
    }

    async fn all_records(&self) -> Result<Vec<MasteryRecord>, KanaError> {
        self.with_snapshot(|s| s.records.values().cloned().collect())
    }

    async fn append_event(&self, event: &AttemptEvent) -> Result<(), KanaError> {
        self.with_snapshot(|s| s.append_event(event))
    }

    async fn write_attempt(
        &self,
        event: &AttemptEvent,
        record: &MasteryRecord,
    ) -> Result<(), KanaError> {
        self.with_snapshot(|s| {
            s.append_event(event);
            s.put_record(record);
        })
    }

    async fn events_since(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AttemptEvent>, KanaError> {
        self.with_snapshot(|s| s.events_since(since))
    }

    async fn event_count(&self) -> Result<usize, KanaError> {
        self.with_snapshot(|s| s.events.len())
    }

    async fn clear(&self) -> Result<(), KanaError> {
        self.with_snapshot(|s| s.clear())
    }
}
