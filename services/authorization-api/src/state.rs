//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use suave_auth_core::{AuthService, MokaTokenCache};
use suave_db::pg::{PgUserRepository, Repositories};
use suave_db::DbPool;

use crate::config::Config;

/// The concrete service this API wires together.
pub type AuthApiService = AuthService<PgUserRepository, MokaTokenCache>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthApiService>,
    pub repos: Repositories,
    pub pool: DbPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(auth: Arc<AuthApiService>, repos: Repositories, pool: DbPool, config: Config) -> Self {
        Self {
            auth,
            repos,
            pool,
            config: Arc::new(config),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
