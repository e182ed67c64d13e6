/**
 * Notify Webhook Handlers
 *
 * HTTP surface of the dispatcher.
 *
 * # Routes
 *
 * - `POST /webhooks/notify` - database-change webhook
 * - `GET /health` - liveness probe
 *
 * # Response Format
 *
 * ```json
 * { "status": "sent", "notification": { ... }, "delivered": true }
 * { "status": "skipped", "reason": "recipient has no push token" }
 * { "status": "ignored", "reason": "operation update is not an insert" }
 * ```
 *
 * An unknown couple answers 404 and malformed bodies answer 400, both with the
 * `{ "error", "status" }` shape of `BackendError`.
 */

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::error::BackendError;
use crate::backend::notify::dispatcher::{DispatchOutcome, Dispatcher};
use crate::backend::notify::event::WebhookEvent;

/// Handle a database-change webhook
///
/// The body is parsed here rather than through the `Json` extractor so a bad
/// payload gets the same error shape as every other failure.
pub async fn handle_notify_webhook(
    State(dispatcher): State<Dispatcher>,
    body: Bytes,
) -> Result<Response, BackendError> {
    let event: WebhookEvent = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejecting malformed webhook body");
        BackendError::protocol(format!("invalid webhook payload: {}", e))
    })?;

    tracing::debug!(operation = %event.operation, table = %event.table, "Webhook received");

    let outcome = dispatcher.dispatch(&event).await?;
    Ok(outcome.into_response())
}

/// Liveness probe
pub async fn health() -> &'static str {
    "ok"
}

impl IntoResponse for DispatchOutcome {
    fn into_response(self) -> Response {
        match self {
            DispatchOutcome::Ignored { reason } => {
                (StatusCode::OK, Json(json!({ "status": "ignored", "reason": reason }))).into_response()
            }
            DispatchOutcome::CoupleNotFound { .. } => {
                BackendError::handler(StatusCode::NOT_FOUND, "couple not found").into_response()
            }
            DispatchOutcome::NoPushToken { .. } => (
                StatusCode::OK,
                Json(json!({ "status": "skipped", "reason": "recipient has no push token" })),
            )
                .into_response(),
            DispatchOutcome::Sent { notification, delivered } => (
                StatusCode::OK,
                Json(json!({ "status": "sent", "notification": notification, "delivered": delivered })),
            )
                .into_response(),
        }
    }
}
