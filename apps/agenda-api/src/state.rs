//! Shared application state passed to route builders.

use database::mongodb::LazyDatabase;
use std::sync::Arc;

/// Cloned per router; the database handle is shared.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB handle that connects on first use
    pub db: Arc<LazyDatabase>,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        let db = Arc::new(LazyDatabase::new(config.mongodb.clone()));
        Self { config, db }
    }
}
