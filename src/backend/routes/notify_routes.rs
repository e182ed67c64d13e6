/**
 * Notify Routes
 *
 * - `POST /webhooks/notify` - database-change webhook
 */

use axum::{routing::post, Router};
use crate::backend::notify::handlers::handle_notify_webhook;
use crate::backend::server::state::AppState;

/// Add the webhook route to the router
pub fn configure_notify_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/webhooks/notify", post(handle_notify_webhook))
}
