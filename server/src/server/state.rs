//! Application state for the Motive HTTP server.

use axum::extract::FromRef;
use motive_core::{Dispatcher, StoreGateway};
use std::sync::Arc;

/// State shared by every handler.
///
/// Cloned per request; clones share one dispatcher and one gateway.
#[derive(Clone)]
pub struct AppState {
    /// Routes requests to store operations.
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Create state over the given store gateway.
    #[must_use]
    pub fn new(gateway: Arc<dyn StoreGateway>) -> Self {
        Self {
            dispatcher: Dispatcher::new(gateway),
        }
    }
}

impl FromRef<AppState> for Dispatcher {
    fn from_ref(state: &AppState) -> Self {
        state.dispatcher.clone()
    }
}
