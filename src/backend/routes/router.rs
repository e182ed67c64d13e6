/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router.
 *
 * # Routes
 *
 * - `GET /health` - liveness probe
 * - `POST /webhooks/notify` - database-change webhook
 *
 * Unknown paths answer 404 with the standard JSON error body. Every request
 * is traced through `TraceLayer`.
 */

use axum::{http::StatusCode, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::notify::handlers::health;
use crate::backend::routes::notify_routes::configure_notify_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_notify_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|| async { BackendError::handler(StatusCode::NOT_FOUND, "not found") });

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}
