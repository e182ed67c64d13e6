//! # Offline Action Queue
//!
//! Buffers user writes (messages, surprises) until the remote store confirms
//! them. Delivery is at-least-once and strictly FIFO.
//!
//! ## Behaviour
//!
//! - `enqueue` appends to the tail, persists, and (when online) schedules a
//!   debounced flush. It never fails from the caller's point of view.
//! - `flush` walks the queue head to tail. A delivered action is removed and the
//!   sequence persisted immediately. With `FailurePolicy::Halt` the first failure
//!   ends the pass and everything from the failed action on stays queued.
//! - Flush passes never overlap. A flush requested while one is running returns
//!   `AlreadyRunning`; the running pass then goes round once more so nothing
//!   appended in the meantime waits for the next trigger.
//! - Only one debounced flush is ever pending. Scheduling another, or going
//!   offline, cancels it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hearth::app::local_db::LocalDatabase;
//! use hearth::app::offline::{OfflineQueue, QueueConfig, RestRemote};
//! use hearth::shared::ActionKind;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(LocalDatabase::open(LocalDatabase::default_path()).await?);
//! let remote = Arc::new(RestRemote::new("https://project.supabase.co", "anon", Duration::from_secs(10))?);
//! let queue = OfflineQueue::open(store, remote, QueueConfig::default()).await?;
//!
//! queue.enqueue(ActionKind::SendMessage, serde_json::json!({ "content": "hi" })).await;
//! queue.set_online(true).await;
//! # Ok(())
//! # }
//! ```

use crate::app::local_db::{ActionStore, StoreError};
use crate::app::offline::remote::RemoteWriter;
use crate::app::sync::NetworkStatus;
use crate::shared::{ActionId, ActionKind, AppConfig, FailurePolicy, QueuedAction};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;

/// Errors raised while opening the queue
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("failed to load offline queue: {0}")]
    Store(#[from] StoreError),
}

/// Queue tuning
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Delay between a trigger and the automatic flush it causes
    pub flush_debounce: Duration,
    pub failure_policy: FailurePolicy,
    /// Connectivity assumed before the first status report
    pub start_online: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            flush_debounce: Duration::from_millis(1000),
            failure_policy: FailurePolicy::Halt,
            start_online: false,
        }
    }
}

impl From<&AppConfig> for QueueConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            flush_debounce: Duration::from_millis(config.flush_debounce_ms),
            failure_policy: config.failure_policy,
            ..Self::default()
        }
    }
}

/// Observable queue state for UI indicators ("offline", "3 pending")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub pending: usize,
    pub online: bool,
    pub flushing: bool,
}

/// How a flush call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Every action was attempted
    Completed,
    /// Stopped at a failed action
    Halted,
    /// Another pass held the flush guard; nothing was sent by this call
    AlreadyRunning,
    /// Not attempted, or stopped, because the queue is offline
    Offline,
}

/// Result of a flush call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushReport {
    pub outcome: FlushOutcome,
    /// Actions confirmed by the remote, in delivery order
    pub delivered: Vec<ActionId>,
    /// Actions whose remote write failed
    pub failed: Vec<ActionId>,
    /// Queue length when the call returned
    pub remaining: usize,
}

impl FlushReport {
    fn skipped(outcome: FlushOutcome, remaining: usize) -> Self {
        Self {
            outcome,
            delivered: Vec::new(),
            failed: Vec::new(),
            remaining,
        }
    }

    fn merge(mut self, next: FlushReport) -> Self {
        self.delivered.extend(next.delivered);
        self.failed.extend(next.failed);
        self.outcome = next.outcome;
        self.remaining = next.remaining;
        self
    }
}

struct Inner {
    actions: RwLock<Vec<QueuedAction>>,
    online: AtomicBool,
    flush_guard: Mutex<()>,
    flush_requested: AtomicBool,
    scheduled: Mutex<Option<JoinHandle<()>>>,
    state: watch::Sender<QueueSnapshot>,
    store: Arc<dyn ActionStore>,
    remote: Arc<dyn RemoteWriter>,
    config: QueueConfig,
}

/// Handle to the offline queue; clones share the same queue
#[derive(Clone)]
pub struct OfflineQueue {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for OfflineQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineQueue")
            .field("snapshot", &*self.inner.state.borrow())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl OfflineQueue {
    /// Rehydrate the persisted queue and return a handle to it
    ///
    /// Nothing can be enqueued before this returns, so a restart never drops a
    /// retained action. When opened online with a non-empty queue, a flush is
    /// scheduled right away.
    pub async fn open(
        store: Arc<dyn ActionStore>,
        remote: Arc<dyn RemoteWriter>,
        config: QueueConfig,
    ) -> Result<Self, QueueError> {
        let loaded = store.load().await?;
        let loaded_count = loaded.len();
        let actions = dedupe(loaded);

        if actions.len() != loaded_count {
            tracing::warn!(
                dropped = loaded_count - actions.len(),
                "Dropped queued actions with duplicate ids"
            );
            if let Err(e) = store.save(&actions).await {
                tracing::error!("Failed to persist deduplicated offline queue: {}", e);
            }
        }

        tracing::info!(pending = actions.len(), "Offline queue rehydrated");

        let (state, _) = watch::channel(QueueSnapshot {
            pending: actions.len(),
            online: config.start_online,
            flushing: false,
        });

        let queue = Self {
            inner: Arc::new(Inner {
                online: AtomicBool::new(config.start_online),
                actions: RwLock::new(actions),
                flush_guard: Mutex::new(()),
                flush_requested: AtomicBool::new(false),
                scheduled: Mutex::new(None),
                state,
                store,
                remote,
                config,
            }),
        };

        if queue.is_online() && !queue.is_empty().await {
            queue.schedule_flush().await;
        }

        Ok(queue)
    }

    /// Append an action to the tail of the queue
    pub async fn enqueue(&self, kind: ActionKind, payload: serde_json::Value) -> ActionId {
        let action = QueuedAction::new(kind, payload);
        let id = action.id;

        let pending = {
            let mut actions = self.inner.actions.write().await;
            actions.push(action);
            self.persist(&actions).await;
            actions.len()
        };
        self.inner.state.send_modify(|s| s.pending = pending);

        tracing::debug!(%id, %kind, pending, "Action enqueued");

        if self.is_online() {
            self.schedule_flush().await;
        }

        id
    }

    /// Deliver retained actions, head to tail
    pub async fn flush(&self) -> FlushReport {
        self.inner.flush_requested.store(true, Ordering::SeqCst);
        let mut report: Option<FlushReport> = None;

        while let Ok(guard) = self.inner.flush_guard.try_lock() {
            self.inner.flush_requested.store(false, Ordering::SeqCst);
            let pass = self.run_pass().await;
            drop(guard);

            let finished = pass.outcome != FlushOutcome::Completed;
            report = Some(match report {
                Some(previous) => previous.merge(pass),
                None => pass,
            });

            if finished || !self.inner.flush_requested.load(Ordering::SeqCst) {
                break;
            }
        }

        match report {
            Some(report) => report,
            None => {
                tracing::debug!("Flush already in progress");
                FlushReport::skipped(FlushOutcome::AlreadyRunning, self.len().await)
            }
        }
    }

    async fn run_pass(&self) -> FlushReport {
        if !self.is_online() {
            return FlushReport::skipped(FlushOutcome::Offline, self.len().await);
        }

        self.inner.state.send_modify(|s| s.flushing = true);

        let mut attempted: HashSet<ActionId> = HashSet::new();
        let mut removed: HashSet<ActionId> = HashSet::new();
        let mut delivered = Vec::new();
        let mut failed = Vec::new();
        let mut outcome = FlushOutcome::Completed;

        loop {
            if !self.is_online() {
                outcome = FlushOutcome::Offline;
                break;
            }

            let next = {
                let actions = self.inner.actions.read().await;
                actions.iter().find(|a| !attempted.contains(&a.id)).cloned()
            };
            let Some(action) = next else {
                break;
            };
            attempted.insert(action.id);

            match self.inner.remote.write(action.kind, &action.payload).await {
                Ok(()) => {
                    removed.insert(action.id);
                    delivered.push(action.id);
                    self.remove(&removed).await;
                    tracing::debug!(id = %action.id, kind = %action.kind, "Queued action delivered");
                }
                Err(e) => {
                    tracing::warn!(id = %action.id, kind = %action.kind, "Queued action failed: {}", e);
                    failed.push(action.id);
                    if self.inner.config.failure_policy == FailurePolicy::Halt {
                        outcome = FlushOutcome::Halted;
                        break;
                    }
                }
            }
        }

        let remaining = self.len().await;
        self.inner.state.send_modify(|s| {
            s.flushing = false;
            s.pending = remaining;
        });

        tracing::info!(
            delivered = delivered.len(),
            failed = failed.len(),
            remaining,
            ?outcome,
            "Flush pass finished"
        );

        FlushReport {
            outcome,
            delivered,
            failed,
            remaining,
        }
    }

    async fn remove(&self, removed: &HashSet<ActionId>) {
        let mut actions = self.inner.actions.write().await;
        actions.retain(|a| !removed.contains(&a.id));
        self.persist(&actions).await;
        let pending = actions.len();
        drop(actions);
        self.inner.state.send_modify(|s| s.pending = pending);
    }

    async fn persist(&self, actions: &[QueuedAction]) {
        if let Err(e) = self.inner.store.save(actions).await {
            tracing::error!(pending = actions.len(), "Failed to persist offline queue: {}", e);
        }
    }

    /// Schedule a flush after the debounce delay, replacing any pending one
    async fn schedule_flush(&self) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let delay = self.inner.config.flush_debounce;

        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                // Detached so that cancelling a later timer never interrupts a running pass
                let queue = OfflineQueue { inner };
                tokio::spawn(async move {
                    queue.flush().await;
                });
            }
        });

        if let Some(previous) = self.inner.scheduled.lock().await.replace(timer) {
            previous.abort();
        }
    }

    async fn cancel_scheduled_flush(&self) {
        if let Some(pending) = self.inner.scheduled.lock().await.take() {
            pending.abort();
        }
    }

    /// Apply a connectivity transition
    ///
    /// Going online schedules a flush; going offline only updates the indicator
    /// and cancels a pending scheduled flush.
    pub async fn set_online(&self, online: bool) {
        let was_online = self.inner.online.swap(online, Ordering::SeqCst);
        self.inner.state.send_modify(|s| s.online = online);

        match (was_online, online) {
            (false, true) => {
                let pending = self.len().await;
                tracing::info!(pending, "Back online");
                self.schedule_flush().await;
            }
            (true, false) => {
                let pending = self.len().await;
                tracing::info!(pending, "Gone offline");
                self.cancel_scheduled_flush().await;
            }
            _ => {}
        }
    }

    /// Follow a connectivity channel until it closes or the queue is dropped
    pub fn watch_connectivity(&self, mut status: watch::Receiver<NetworkStatus>) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        let mut online = status.borrow_and_update().is_online();

        tokio::spawn(async move {
            loop {
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                OfflineQueue { inner }.set_online(online).await;

                if status.changed().await.is_err() {
                    break;
                }
                online = status.borrow_and_update().is_online();
            }
        })
    }

    /// Discard every retained action
    pub async fn clear(&self) {
        let mut actions = self.inner.actions.write().await;
        let dropped = actions.len();
        actions.clear();
        self.persist(&actions).await;
        drop(actions);
        self.inner.state.send_modify(|s| s.pending = 0);
        tracing::warn!(dropped, "Offline queue cleared");
    }

    /// Retained actions in delivery order
    pub async fn pending(&self) -> Vec<QueuedAction> {
        self.inner.actions.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.actions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.actions.read().await.is_empty()
    }

    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    /// Receiver for queue depth / connectivity / flushing changes
    pub fn subscribe(&self) -> watch::Receiver<QueueSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        *self.inner.state.borrow()
    }
}

/// Keep the first occurrence of every id
fn dedupe(actions: Vec<QueuedAction>) -> Vec<QueuedAction> {
    let mut seen = HashSet::new();
    actions.into_iter().filter(|a| seen.insert(a.id)).collect()
}
