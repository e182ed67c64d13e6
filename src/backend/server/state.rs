/**
 * Application State Management
 *
 * `AppState` is the router state; `FromRef` lets handlers extract the
 * `Dispatcher` directly with `State<Dispatcher>`.
 */

use axum::extract::FromRef;
use crate::backend::notify::dispatcher::Dispatcher;

/// Shared state of the notification server
#[derive(Clone, Debug)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

impl FromRef<AppState> for Dispatcher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.dispatcher.clone()
    }
}
