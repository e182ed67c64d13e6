/**
 * Server Initialization
 *
 * Assembles the dispatcher from configuration and builds the router.
 *
 * # Initialization Process
 *
 * 1. Connect the PostgreSQL pool for couple and profile lookups
 * 2. Build the push gateway client
 * 3. Create the dispatcher and application state
 * 4. Configure routes and middleware
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::notify::directory::PgDirectory;
use crate::backend::notify::dispatcher::Dispatcher;
use crate::backend::notify::push::ExpoPushGateway;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, NotifyConfig};
use crate::backend::server::state::AppState;

/// Router around an already-built dispatcher
pub fn create_app(dispatcher: Dispatcher) -> Router<()> {
    create_router(AppState::new(dispatcher))
}

/// Build the full application from configuration
///
/// Fails when the database cannot be reached or the push client cannot be
/// constructed.
pub async fn create_app_from_config(config: &NotifyConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing Hearth notification server");

    let pool = connect_database(&config.database_url).await?;
    let directory = Arc::new(PgDirectory::new(pool));

    let mut gateway = ExpoPushGateway::new(config.push_gateway_url.clone(), config.push_timeout)
        .map_err(|e| BackendError::state(format!("push client unavailable: {}", e)))?;
    if let Some(token) = &config.push_access_token {
        gateway = gateway.with_access_token(token.clone());
    }

    tracing::info!(
        gateway = %config.push_gateway_url,
        timeout = ?config.push_timeout,
        "Push gateway configured"
    );

    Ok(create_app(Dispatcher::new(directory, Arc::new(gateway))))
}
