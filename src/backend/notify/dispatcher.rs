/**
 * Notification Dispatcher
 *
 * Turns one inserted `messages` or `surprises` row into at most one push
 * notification for the other member of the couple.
 *
 * # Flow
 *
 * 1. Only inserts into `messages` / `surprises` are considered; everything
 *    else is ignored before any lookup.
 * 2. The couple is resolved and the recipient is the member that did not send
 *    the row.
 * 3. Sender display name and recipient push token are looked up; missing
 *    optional data degrades the notification instead of failing it.
 * 4. The notification is handed to the push gateway once. Gateway failures
 *    are logged and reported as `delivered: false`.
 */

use crate::backend::error::BackendError;
use crate::backend::notify::directory::Directory;
use crate::backend::notify::event::{id_field, InsertedRow, Operation, Table, WebhookEvent};
use crate::backend::notify::push::PushGateway;
use crate::shared::PushNotification;
use std::sync::Arc;

/// Display name used when the sender has no profile name
pub const PLACEHOLDER_SENDER_NAME: &str = "Your partner";

/// Maximum characters of message content carried in a notification body
pub const MESSAGE_BODY_LIMIT: usize = 120;

const MESSAGE_FALLBACK_BODY: &str = "Sent you a message";
const SURPRISE_FALLBACK_BODY: &str = "Open Hearth to see what it is";

/// Result of handling one webhook event
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Event does not produce a notification
    Ignored { reason: String },
    /// Referenced couple does not exist
    CoupleNotFound { couple_id: String },
    /// Recipient has no registered push token
    NoPushToken { recipient_id: String },
    /// Notification built and handed to the gateway
    Sent {
        notification: PushNotification,
        delivered: bool,
    },
}

impl DispatchOutcome {
    fn ignored(reason: impl Into<String>) -> Self {
        Self::Ignored { reason: reason.into() }
    }
}

/// Webhook dispatcher shared across request handlers
#[derive(Clone)]
pub struct Dispatcher {
    directory: Arc<dyn Directory>,
    gateway: Arc<dyn PushGateway>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(directory: Arc<dyn Directory>, gateway: Arc<dyn PushGateway>) -> Self {
        Self { directory, gateway }
    }

    /// Handle one database-change event
    ///
    /// Only a record without couple or sender identifiers is an error
    /// (`BackendError::SharedError`, mapped to 400). Lookup failures degrade
    /// into the matching outcome instead of failing the request.
    pub async fn dispatch(&self, event: &WebhookEvent) -> Result<DispatchOutcome, BackendError> {
        if event.operation != Operation::Insert {
            tracing::debug!(operation = %event.operation, table = %event.table, "Ignoring non-insert event");
            return Ok(DispatchOutcome::ignored(format!("operation {} is not an insert", event.operation)));
        }
        if !matches!(event.table, Table::Messages | Table::Surprises) {
            tracing::debug!(table = %event.table, "Ignoring event for unrelated table");
            return Ok(DispatchOutcome::ignored(format!("table {} does not notify", event.table)));
        }

        let row = event.inserted_row()?;

        let couple = match self.directory.couple(&row.couple_id).await {
            Ok(Some(couple)) => couple,
            Ok(None) => {
                tracing::warn!(couple_id = %row.couple_id, "Couple not found");
                return Ok(DispatchOutcome::CoupleNotFound { couple_id: row.couple_id });
            }
            Err(e) => {
                tracing::error!(couple_id = %row.couple_id, error = %e, "Couple lookup failed");
                return Ok(DispatchOutcome::CoupleNotFound { couple_id: row.couple_id });
            }
        };

        let recipient_id = match couple.counterpart(&row.sender_id) {
            Some(recipient) => recipient.to_string(),
            None => {
                tracing::warn!(
                    couple_id = %couple.id,
                    sender_id = %row.sender_id,
                    "Sender is not a member of the couple"
                );
                return Ok(DispatchOutcome::ignored("sender is not a member of the couple"));
            }
        };

        let sender_name = self.sender_name(&row.sender_id).await;
        let (title, body, deep_link) = compose(&event.table, &row, &sender_name);

        let push_token = match self.directory.profile(&recipient_id).await {
            Ok(Some(profile)) => profile.push_token.filter(|t| !t.trim().is_empty()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(recipient_id = %recipient_id, error = %e, "Recipient profile lookup failed");
                None
            }
        };
        let Some(push_token) = push_token else {
            tracing::info!(recipient_id = %recipient_id, "Recipient has no push token, skipping");
            return Ok(DispatchOutcome::NoPushToken { recipient_id });
        };

        let notification = PushNotification::new(push_token, title, body, deep_link);
        let delivered = match self.gateway.send(&notification).await {
            Ok(()) => {
                tracing::info!(
                    recipient_id = %recipient_id,
                    table = %event.table,
                    "Push notification delivered"
                );
                true
            }
            Err(e) => {
                tracing::error!(recipient_id = %recipient_id, error = %e, "Push delivery failed");
                false
            }
        };

        Ok(DispatchOutcome::Sent { notification, delivered })
    }

    async fn sender_name(&self, sender_id: &str) -> String {
        match self.directory.profile(sender_id).await {
            Ok(profile) => profile
                .and_then(|p| p.display_name)
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_SENDER_NAME.to_string()),
            Err(e) => {
                tracing::warn!(sender_id = %sender_id, error = %e, "Sender profile lookup failed");
                PLACEHOLDER_SENDER_NAME.to_string()
            }
        }
    }
}

/// Title, body and deep link for a row
fn compose(table: &Table, row: &InsertedRow, sender_name: &str) -> (String, String, String) {
    match table {
        Table::Surprises => {
            let body = row.text("title").unwrap_or(SURPRISE_FALLBACK_BODY).to_string();
            let deep_link = match id_field(&row.record, &["id"]) {
                Some(id) => format!("hearth://surprises/{}", id),
                None => "hearth://surprises".to_string(),
            };
            (format!("{} sent you a surprise", sender_name), body, deep_link)
        }
        _ => {
            let body = row
                .text("content")
                .map(|content| content.chars().take(MESSAGE_BODY_LIMIT).collect())
                .unwrap_or_else(|| MESSAGE_FALLBACK_BODY.to_string());
            (sender_name.to_string(), body, "hearth://chat".to_string())
        }
    }
}
