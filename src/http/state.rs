//! Application state for the HTTP server.

use std::sync::Arc;

use crate::api::MatchMode;
use crate::db::repository::ItemRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn ItemRepository>,
    /// Case behavior for title search, fixed at startup
    pub match_mode: MatchMode,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn ItemRepository>, match_mode: MatchMode) -> Self {
        Self {
            repository,
            match_mode,
        }
    }
}
