//! # Offline Messaging
//!
//! Keeps user writes alive across connectivity loss and restarts.
//!
//! ## Key Components
//!
//! - `queue.rs`: the `OfflineQueue` state container (enqueue, flush, connectivity)
//! - `remote.rs`: the `RemoteWriter` seam and its PostgREST client
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hearth::app::offline::{OfflineQueue, QueueConfig, RestRemote};
//! use hearth::app::local_db::MemoryActionStore;
//! use hearth::app::sync::NetworkMonitor;
//! use hearth::shared::ActionKind;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let remote = Arc::new(RestRemote::new("https://project.supabase.co", "anon", Duration::from_secs(10))?);
//! let queue = OfflineQueue::open(Arc::new(MemoryActionStore::new()), remote, QueueConfig::default()).await?;
//!
//! let monitor = NetworkMonitor::new();
//! queue.watch_connectivity(monitor.subscribe());
//!
//! queue.enqueue(ActionKind::SendSurprise, serde_json::json!({ "title": "flowers" })).await;
//! monitor.report(true, true); // replays the queue after the debounce delay
//! # Ok(())
//! # }
//! ```

pub mod queue;
pub mod remote;

pub use queue::{FlushOutcome, FlushReport, OfflineQueue, QueueConfig, QueueError, QueueSnapshot};
pub use remote::{RemoteError, RemoteWriter, RestRemote};
