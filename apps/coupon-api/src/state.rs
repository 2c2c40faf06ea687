//! Shared application state.

use std::sync::Arc;

use coupon_db::Database;

use crate::config::ApiConfig;

/// State handed to every handler. Clones share the pool and the config.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}
