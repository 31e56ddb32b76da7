//! Server state management.

use std::sync::Arc;

use recall_core::SearchOrchestrator;

/// Shared application state: the engine behind every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchOrchestrator>,
}

impl AppState {
    pub fn new(engine: Arc<SearchOrchestrator>) -> Self {
        Self { engine }
    }
}
