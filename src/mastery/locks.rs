use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
    },
};

use tokio::sync::{
    Mutex as AsyncMutex,
    OwnedMutexGuard,
};

/// One async lock per key. Holders of different keys never wait on each other;
/// holders of the same key queue up in arrival order.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            // Keys are character ids, so the map stays as small as the catalog
            locks.entry(key.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
