use std::sync::Arc;

use sqlx::SqlitePool;

use crate::store::TaskStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub tasks: Arc<TaskStore>,
}
