//! # Action Store
//!
//! Durable storage for the offline queue's retained sequence. The whole sequence
//! is written as one JSON array under a single record, so a save either replaces
//! everything or nothing.

use super::{LocalDatabase, Result, StoreError};
use crate::shared::QueuedAction;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Record name under which the queue is persisted
pub const QUEUE_RECORD_KEY: &str = "hearth.offline_queue";

/// Persistence seam for the offline queue
#[async_trait]
pub trait ActionStore: Send + Sync {
    /// Read the persisted sequence; empty when nothing was saved yet
    async fn load(&self) -> Result<Vec<QueuedAction>>;

    /// Replace the persisted sequence
    async fn save(&self, actions: &[QueuedAction]) -> Result<()>;
}

/// Decode a persisted array, skipping entries that no longer parse
fn decode(raw: &str) -> Result<Vec<QueuedAction>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut actions = Vec::with_capacity(values.len());

    for value in values {
        match serde_json::from_value::<QueuedAction>(value) {
            Ok(action) => actions.push(action),
            Err(e) => tracing::warn!("Skipping malformed queued action: {}", e),
        }
    }

    Ok(actions)
}

#[async_trait]
impl ActionStore for LocalDatabase {
    async fn load(&self) -> Result<Vec<QueuedAction>> {
        match self.get_record(QUEUE_RECORD_KEY).await? {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, actions: &[QueuedAction]) -> Result<()> {
        let raw = serde_json::to_string(actions)?;
        self.put_record(QUEUE_RECORD_KEY, &raw).await
    }
}

/// In-memory store holding the serialized record
///
/// Goes through the same JSON encoding as the SQLite store. Writes can be made to
/// fail to simulate a full or locked disk.
#[derive(Debug, Default)]
pub struct MemoryActionStore {
    record: RwLock<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already persisted sequence
    pub fn with_actions(actions: &[QueuedAction]) -> Result<Self> {
        Ok(Self {
            record: RwLock::new(Some(serde_json::to_string(actions)?)),
            fail_writes: AtomicBool::new(false),
        })
    }

    /// Make subsequent saves fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw persisted JSON, if any
    pub async fn raw(&self) -> Option<String> {
        self.record.read().await.clone()
    }
}

#[async_trait]
impl ActionStore for MemoryActionStore {
    async fn load(&self) -> Result<Vec<QueuedAction>> {
        match self.record.read().await.as_deref() {
            Some(raw) => decode(raw),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, actions: &[QueuedAction]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "simulated write failure",
            )));
        }
        *self.record.write().await = Some(serde_json::to_string(actions)?);
        Ok(())
    }
}
