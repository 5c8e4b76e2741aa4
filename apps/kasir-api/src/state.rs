//! Shared router state.

use kasir_db::Database;

/// State handed to every handler.
///
/// Only the pool is shared; each request takes its own repository.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
