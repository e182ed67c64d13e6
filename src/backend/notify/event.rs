/**
 * Webhook Event
 *
 * The database-change payload delivered to the notification webhook. The
 * database emits:
 *
 * ```json
 * {
 *   "type": "INSERT",
 *   "table": "messages",
 *   "schema": "public",
 *   "record": { "couple_id": "...", "sender_id": "...", "content": "..." },
 *   "old_record": null
 * }
 * ```
 *
 * `operation` is accepted as an alias of `type`, `oldRecord` of `old_record`,
 * and `coupleId` / `senderId` of the snake_case record columns.
 */

use crate::shared::SharedError;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Kind of row change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Update,
    Delete,
    Other(String),
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_lowercase().as_str() {
            "insert" => Operation::Insert,
            "update" => Operation::Update,
            "delete" => Operation::Delete,
            _ => Operation::Other(raw),
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert => write!(f, "insert"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Source table of the change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Table {
    Messages,
    Surprises,
    Other(String),
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "messages" => Table::Messages,
            "surprises" => Table::Surprises,
            _ => Table::Other(raw),
        })
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Messages => write!(f, "messages"),
            Table::Surprises => write!(f, "surprises"),
            Table::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Inbound webhook body
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(alias = "type")]
    pub operation: Operation,
    pub table: Table,
    #[serde(default)]
    pub record: Option<serde_json::Value>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default, alias = "oldRecord")]
    pub old_record: Option<serde_json::Value>,
}

/// The identifying columns of an inserted row
#[derive(Debug, Clone, PartialEq)]
pub struct InsertedRow {
    pub couple_id: String,
    pub sender_id: String,
    pub record: serde_json::Value,
}

impl InsertedRow {
    /// A non-empty string column of the row
    pub fn text(&self, column: &str) -> Option<&str> {
        self.record
            .get(column)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl WebhookEvent {
    /// Extract couple and sender identifiers from the record
    pub fn inserted_row(&self) -> Result<InsertedRow, SharedError> {
        let record = self
            .record
            .as_ref()
            .filter(|r| r.is_object())
            .ok_or_else(|| SharedError::validation("record", "expected an object"))?;

        let couple_id = id_field(record, &["couple_id", "coupleId"])
            .ok_or_else(|| SharedError::validation("record.couple_id", "missing couple identifier"))?;
        let sender_id = id_field(record, &["sender_id", "senderId"])
            .ok_or_else(|| SharedError::validation("record.sender_id", "missing sender identifier"))?;

        Ok(InsertedRow {
            couple_id,
            sender_id,
            record: record.clone(),
        })
    }
}

/// Identifier columns may arrive as strings or integers
pub(crate) fn id_field(record: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match record.get(*key)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
