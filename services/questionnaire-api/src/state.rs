//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use suave_db::pg::Repositories;
use suave_db::DbPool;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub pool: DbPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repos: Repositories, pool: DbPool, config: Config) -> Self {
        Self {
            repos,
            pool,
            config: Arc::new(config),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        self.config.request_timeout
    }
}
