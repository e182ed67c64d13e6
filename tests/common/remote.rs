//! Scripted remote writer
//!
//! Records every payload it is asked to write. A payload whose `seq` field is
//! in the failing set is rejected.

use async_trait::async_trait;
use hearth::app::offline::{RemoteError, RemoteWriter};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Default)]
pub struct ScriptedRemote {
    failing: Mutex<HashSet<u64>>,
    written: Mutex<Vec<Value>>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(seqs: impl IntoIterator<Item = u64>) -> Self {
        let remote = Self::default();
        remote.failing.lock().unwrap().extend(seqs);
        remote
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    /// `seq` values of every payload written, in call order
    pub fn written_seqs(&self) -> Vec<u64> {
        self.written
            .lock()
            .unwrap()
            .iter()
            .filter_map(|p| p.get("seq").and_then(Value::as_u64))
            .collect()
    }

    fn attempt(&self, payload: &Value) -> Result<(), RemoteError> {
        let seq = payload.get("seq").and_then(Value::as_u64);
        if seq.is_some_and(|s| self.failing.lock().unwrap().contains(&s)) {
            return Err(RemoteError::Rejected {
                status: 400,
                message: "violates check constraint".to_string(),
            });
        }
        self.written.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

#[async_trait]
impl RemoteWriter for ScriptedRemote {
    async fn insert_message(&self, payload: &Value) -> Result<(), RemoteError> {
        self.attempt(payload)
    }

    async fn insert_surprise(&self, payload: &Value) -> Result<(), RemoteError> {
        self.attempt(payload)
    }
}
