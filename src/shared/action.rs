//! Queued Action Types
//!
//! A `QueuedAction` is one user-initiated write (a chat message or a surprise)
//! waiting to reach the remote store. The client queue persists these as a JSON
//! array, so the serialized shape here is the on-disk format.
//!
//! # Serialized Form
//!
//! ```json
//! {
//!   "id": "5b0f6c1e-3f65-4c4c-9f43-2a8d1c1c9e4a",
//!   "kind": "send_message",
//!   "payload": { "couple_id": "...", "sender_id": "...", "content": "hi" },
//!   "enqueuedAt": "2026-10-15T08:30:00Z"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a queued action
pub type ActionId = Uuid;

/// The remote write an action maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Insert into the `messages` table
    SendMessage,
    /// Insert into the `surprises` table
    SendSurprise,
}

impl ActionKind {
    /// Name of the remote table this kind writes to
    pub fn table(&self) -> &'static str {
        match self {
            ActionKind::SendMessage => "messages",
            ActionKind::SendSurprise => "surprises",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::SendMessage => write!(f, "send_message"),
            ActionKind::SendSurprise => write!(f, "send_surprise"),
        }
    }
}

/// A write operation retained until the remote store confirms it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedAction {
    /// Unique identifier, generated at enqueue time
    pub id: ActionId,
    /// Which remote write to perform
    pub kind: ActionKind,
    /// Forwarded verbatim to the remote insert
    pub payload: serde_json::Value,
    /// Diagnostics only; not used for ordering or expiry
    pub enqueued_at: DateTime<Utc>,
}

impl QueuedAction {
    /// Create a new action with a fresh identifier
    pub fn new(kind: ActionKind, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            payload,
            enqueued_at: Utc::now(),
        }
    }
}
