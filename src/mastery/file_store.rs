use std::path::{
    Path,
    PathBuf,
};

use async_trait::async_trait;
use chrono::{
    DateTime,
    Utc,
};
use tokio::sync::Mutex;

use super::{
    record::MasteryRecord,
    store::{
        KanaStore,
        StoreSnapshot,
    },
};
use crate::core::{
    AttemptEvent,
    KanaError,
};

/// Durable store: the whole snapshot is kept in memory and rewritten to a
/// JSON file on every change. Memory is only updated once the file write
/// has succeeded, so a failed write leaves both sides as they were.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    snapshot: Mutex<StoreSnapshot>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, KanaError> {
        let path = path.into();

        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<StoreSnapshot>(&bytes)
                .map_err(|e| KanaError::persistence(&format!("failed to parse {}", path.display()), e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreSnapshot::new(),
            Err(e) => {
                return Err(KanaError::persistence(&format!("failed to read {}", path.display()), e))
            }
        };

        tracing::info!(
            path = %path.display(),
            events = snapshot.events.len(),
            records = snapshot.records.len(),
            "opened progress store"
        );
        Ok(Self { path, snapshot: Mutex::new(snapshot) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_snapshot(&self, snapshot: &StoreSnapshot) -> Result<(), KanaError> {
        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| KanaError::persistence("failed to serialize progress", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    KanaError::persistence(&format!("failed to create {}", parent.display()), e)
                })?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json).await.map_err(|e| {
            KanaError::persistence(&format!("failed to write {}", temp_path.display()), e)
        })?;
        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            KanaError::persistence(&format!("failed to replace {}", self.path.display()), e)
        })
    }

    /// Apply `change` to a copy of the snapshot, persist it, then publish it.
    async fn commit(&self, change: impl FnOnce(&mut StoreSnapshot)) -> Result<(), KanaError> {
        let mut current = self.snapshot.lock().await;
        let mut next = current.clone();
        change(&mut next);

        self.write_snapshot(&next).await?;
        *current = next;
        Ok(())
    }
}

#[async_trait]
impl KanaStore for JsonFileStore {
    async fn get_record(&self, character_id: &str) -> Result<Option<MasteryRecord>, KanaError> {
        Ok(self.snapshot.lock().await.get_record(character_id))
    }

    async fn put_record(&self, record: &MasteryRecord) -> Result<(), KanaError> {
        self.commit(|s| s.put_record(record)).await
    }

    async fn all_records(&self) -> Result<Vec<MasteryRecord>, KanaError> {
        Ok(self.snapshot.lock().await.records.values().cloned().collect())
    }

    async fn append_event(&self, event: &AttemptEvent) -> Result<(), KanaError> {
        self.commit(|s| s.append_event(event)).await
    }

    async fn write_attempt(
        &self,
        event: &AttemptEvent,
        record: &MasteryRecord,
    ) -> Result<(), KanaError> {
        self.commit(|s| {
            s.append_event(event);
            s.put_record(record);
        })
        .await
    }

    async fn events_since(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AttemptEvent>, KanaError> {
        Ok(self.snapshot.lock().await.events_since(since))
    }

    async fn event_count(&self) -> Result<usize, KanaError> {
        Ok(self.snapshot.lock().await.events.len())
    }

    async fn clear(&self) -> Result<(), KanaError> {
        self.commit(|s| s.clear()).await
    }
}
