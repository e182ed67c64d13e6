//! Storage and queue fixtures

use hearth::app::local_db::LocalDatabase;
use hearth::app::offline::{OfflineQueue, QueueConfig, RemoteWriter};
use hearth::shared::{ActionKind, FailurePolicy};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Fresh on-disk database inside a temporary directory
pub async fn temp_database() -> (TempDir, LocalDatabase) {
    let dir = TempDir::new().unwrap();
    let db = LocalDatabase::open(dir.path().join("local.db")).await.unwrap();
    (dir, db)
}

/// Queue settings for tests that drive `flush` by hand
///
/// The debounce is long enough that no automatic flush fires during a test.
pub fn manual_config(policy: FailurePolicy, start_online: bool) -> QueueConfig {
    QueueConfig {
        flush_debounce: Duration::from_secs(3600),
        failure_policy: policy,
        start_online,
    }
}

/// Open the queue persisted at `path`
pub async fn open_queue(
    path: &Path,
    remote: Arc<dyn RemoteWriter>,
    config: QueueConfig,
) -> (LocalDatabase, OfflineQueue) {
    let db = LocalDatabase::open(path).await.unwrap();
    let queue = OfflineQueue::open(Arc::new(db.clone()), remote, config).await.unwrap();
    (db, queue)
}

/// Enqueue `count` messages tagged `seq = 0..count`
pub async fn enqueue_sequence(queue: &OfflineQueue, count: u64) {
    for seq in 0..count {
        queue
            .enqueue(ActionKind::SendMessage, serde_json::json!({ "seq": seq, "content": format!("m{}", seq) }))
            .await;
    }
}

/// `seq` values of the retained actions, head to tail
pub async fn pending_seqs(queue: &OfflineQueue) -> Vec<u64> {
    queue
        .pending()
        .await
        .iter()
        .filter_map(|a| a.payload.get("seq").and_then(|v| v.as_u64()))
        .collect()
}
