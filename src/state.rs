use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state, built once in main() and injected into every
/// handler and middleware through axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
