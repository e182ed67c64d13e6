//! Property-based tests for the offline queue
//!
//! Uses proptest to generate enqueue sequences, restart points and failure
//! positions, driving the async queue on a per-case tokio runtime.

use crate::common::*;
use hearth::app::local_db::MemoryActionStore;
use hearth::app::offline::{FlushOutcome, OfflineQueue};
use hearth::shared::FailurePolicy;
use proptest::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_offline_enqueues_are_retained_in_order_across_restarts(
        batches in prop::collection::vec(0u64..6, 1..5),
    ) {
        let expected: u64 = batches.iter().sum();
        let retained = runtime().block_on(async {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("local.db");
            let remote = Arc::new(ScriptedRemote::new());
            let mut next = 0u64;

            for batch in &batches {
                let (_db, queue) = open_queue(&path, remote.clone(), manual_config(FailurePolicy::Halt, false)).await;
                for _ in 0..*batch {
                    queue.enqueue(hearth::shared::ActionKind::SendMessage, serde_json::json!({ "seq": next })).await;
                    next += 1;
                }
            }

            let (_db, queue) = open_queue(&path, remote, manual_config(FailurePolicy::Halt, false)).await;
            pending_seqs(&queue).await
        });

        prop_assert_eq!(retained, (0..expected).collect::<Vec<_>>());
    }

    #[test]
    fn test_halt_retains_exactly_the_suffix(len in 1u64..12, k in 0u64..12) {
        let k = k % len;
        let (outcome, retained, written) = runtime().block_on(async {
            let remote = Arc::new(ScriptedRemote::failing_on([k]));
            let queue = OfflineQueue::open(
                Arc::new(MemoryActionStore::new()),
                remote.clone(),
                manual_config(FailurePolicy::Halt, true),
            )
            .await
            .unwrap();

            enqueue_sequence(&queue, len).await;
            let report = queue.flush().await;
            (report.outcome, pending_seqs(&queue).await, remote.written_seqs())
        });

        prop_assert_eq!(outcome, FlushOutcome::Halted);
        prop_assert_eq!(retained, (k..len).collect::<Vec<_>>());
        prop_assert_eq!(written, (0..k).collect::<Vec<_>>());
    }

    #[test]
    fn test_skip_retains_only_the_failure(len in 1u64..12, k in 0u64..12) {
        let k = k % len;
        let (retained, written) = runtime().block_on(async {
            let remote = Arc::new(ScriptedRemote::failing_on([k]));
            let queue = OfflineQueue::open(
                Arc::new(MemoryActionStore::new()),
                remote.clone(),
                manual_config(FailurePolicy::Skip, true),
            )
            .await
            .unwrap();

            enqueue_sequence(&queue, len).await;
            queue.flush().await;
            (pending_seqs(&queue).await, remote.written_seqs())
        });

        prop_assert_eq!(retained, vec![k]);
        prop_assert_eq!(written.len() as u64, len - 1);
    }

    #[test]
    fn test_successful_flush_empties_queue(len in 0u64..16) {
        let (remaining, written) = runtime().block_on(async {
            let remote = Arc::new(ScriptedRemote::new());
            let queue = OfflineQueue::open(
                Arc::new(MemoryActionStore::new()),
                remote.clone(),
                manual_config(FailurePolicy::Halt, true),
            )
            .await
            .unwrap();

            enqueue_sequence(&queue, len).await;
            let report = queue.flush().await;
            (report.remaining, remote.written_seqs())
        });

        prop_assert_eq!(remaining, 0);
        prop_assert_eq!(written, (0..len).collect::<Vec<_>>());
    }
}
