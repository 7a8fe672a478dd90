/// Shared application state
use crate::services::AuthService;
use sqlx::SqlitePool;
use std::sync::Arc;
use watchplan_extractor::PlaylistExtractor;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub extractor: Arc<dyn PlaylistExtractor>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        auth_service: Arc<AuthService>,
        extractor: Arc<dyn PlaylistExtractor>,
    ) -> Self {
        Self {
            pool,
            auth_service,
            extractor,
        }
    }
}
