use crate::db::DbPool;

/// Shared per-process context handed to every handler. Handlers check a
/// connection out of `db` for the duration of one request.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}
