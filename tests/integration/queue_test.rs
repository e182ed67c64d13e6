//! Offline queue integration tests
//!
//! Exercises the queue against an on-disk SQLite database, including process
//! restarts (close and reopen of the same file).

use crate::common::*;
use hearth::app::local_db::{ActionStore, QUEUE_RECORD_KEY};
use hearth::app::offline::FlushOutcome;
use hearth::shared::{ActionKind, FailurePolicy};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_offline_enqueues_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local.db");
    let remote = Arc::new(ScriptedRemote::new());

    {
        let (_db, queue) = open_queue(&path, remote.clone(), manual_config(FailurePolicy::Halt, false)).await;
        enqueue_sequence(&queue, 5).await;
        assert_eq!(queue.len().await, 5);
    }

    let (db, queue) = open_queue(&path, remote.clone(), manual_config(FailurePolicy::Halt, false)).await;
    assert_eq!(pending_seqs(&queue).await, vec![0, 1, 2, 3, 4]);
    assert!(remote.written_seqs().is_empty());

    let stored = db.get_record(QUEUE_RECORD_KEY).await.unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_flush_drains_and_persists_empty_queue() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local.db");
    let remote = Arc::new(ScriptedRemote::new());

    {
        let (_db, queue) = open_queue(&path, remote.clone(), manual_config(FailurePolicy::Halt, true)).await;
        enqueue_sequence(&queue, 3).await;

        let report = queue.flush().await;
        assert_eq!(report.outcome, FlushOutcome::Completed);
        assert_eq!(report.delivered.len(), 3);
        assert_eq!(report.remaining, 0);
    }

    assert_eq!(remote.written_seqs(), vec![0, 1, 2]);

    let (db, queue) = open_queue(&path, remote, manual_config(FailurePolicy::Halt, false)).await;
    assert!(queue.is_empty().await);
    assert!(db.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_halted_flush_retains_suffix_across_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local.db");
    let remote = Arc::new(ScriptedRemote::failing_on([2]));

    {
        let (_db, queue) = open_queue(&path, remote.clone(), manual_config(FailurePolicy::Halt, true)).await;
        enqueue_sequence(&queue, 5).await;

        let report = queue.flush().await;
        assert_eq!(report.outcome, FlushOutcome::Halted);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(pending_seqs(&queue).await, vec![2, 3, 4]);
    }

    remote.heal();
    let (_db, queue) = open_queue(&path, remote.clone(), manual_config(FailurePolicy::Halt, true)).await;
    assert_eq!(pending_seqs(&queue).await, vec![2, 3, 4]);

    let report = queue.flush().await;
    assert_eq!(report.outcome, FlushOutcome::Completed);
    assert_eq!(remote.written_seqs(), vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_skip_policy_keeps_only_failures() {
    let (_dir, db) = temp_database().await;
    let remote = Arc::new(ScriptedRemote::failing_on([1, 3]));
    let queue = hearth::app::offline::OfflineQueue::open(
        Arc::new(db.clone()),
        remote.clone(),
        manual_config(FailurePolicy::Skip, true),
    )
    .await
    .unwrap();

    enqueue_sequence(&queue, 5).await;
    let report = queue.flush().await;

    assert_eq!(report.outcome, FlushOutcome::Completed);
    assert_eq!(remote.written_seqs(), vec![0, 2, 4]);
    assert_eq!(pending_seqs(&queue).await, vec![1, 3]);
    assert_eq!(db.load().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_concurrent_flushes_send_each_action_once() {
    let (_dir, db) = temp_database().await;
    let remote = Arc::new(ScriptedRemote::new());
    let queue = hearth::app::offline::OfflineQueue::open(
        Arc::new(db),
        remote.clone(),
        manual_config(FailurePolicy::Halt, true),
    )
    .await
    .unwrap();

    enqueue_sequence(&queue, 20).await;

    let (a, b) = tokio::join!(queue.flush(), queue.flush());
    assert_eq!(a.delivered.len() + b.delivered.len(), 20);

    let mut written = remote.written_seqs();
    assert_eq!(written.len(), 20);
    written.dedup();
    assert_eq!(written, (0..20).collect::<Vec<_>>());
    assert!(queue.is_empty().await);
}

#[tokio::test]
async fn test_mixed_kinds_keep_global_order() {
    let (_dir, db) = temp_database().await;
    let remote = Arc::new(ScriptedRemote::new());
    let queue = hearth::app::offline::OfflineQueue::open(
        Arc::new(db),
        remote.clone(),
        manual_config(FailurePolicy::Halt, false),
    )
    .await
    .unwrap();

    queue.enqueue(ActionKind::SendMessage, serde_json::json!({ "seq": 0 })).await;
    queue.enqueue(ActionKind::SendSurprise, serde_json::json!({ "seq": 1, "title": "flowers" })).await;
    queue.enqueue(ActionKind::SendMessage, serde_json::json!({ "seq": 2 })).await;

    let kinds: Vec<ActionKind> = queue.pending().await.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![ActionKind::SendMessage, ActionKind::SendSurprise, ActionKind::SendMessage]);

    let offline = queue.flush().await;
    assert_eq!(offline.outcome, FlushOutcome::Offline);
    assert!(remote.written_seqs().is_empty());

    queue.set_online(true).await;
    queue.flush().await;
    assert_eq!(remote.written_seqs(), vec![0, 1, 2]);
}
