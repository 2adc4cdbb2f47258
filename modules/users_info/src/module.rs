use axum::Router;
use std::sync::Arc;
use tracing::info;

use crate::api::rest::{handlers::UsersState, routes};
use crate::config::UsersInfoConfig;
use crate::domain::repo::UsersRepository;
use crate::infra::storage::InMemoryUsersRepository;

/// The users module: one repository plus the REST surface on top of it.
#[derive(Clone)]
pub struct UsersInfo {
    repo: Arc<dyn UsersRepository>,
    config: UsersInfoConfig,
}

impl UsersInfo {
    /// Module backed by a fresh, empty in-memory store.
    pub fn new(config: UsersInfoConfig) -> Self {
        Self::with_repository(Arc::new(InMemoryUsersRepository::new()), config)
    }

    pub fn with_repository(repo: Arc<dyn UsersRepository>, config: UsersInfoConfig) -> Self {
        info!(
            read_timeout_ms = config.read_timeout.as_millis() as u64,
            "users_info module initialized"
        );
        Self { repo, config }
    }

    pub fn repository(&self) -> Arc<dyn UsersRepository> {
        self.repo.clone()
    }

    pub fn config(&self) -> &UsersInfoConfig {
        &self.config
    }

    /// Mount `/users` and `/users/{id}` on `router`.
    pub fn register_rest(&self, router: Router) -> Router {
        let state = UsersState {
            repo: self.repo.clone(),
            read_timeout: self.config.read_timeout,
        };
        let router = routes::register_routes(router, state);
        info!("users_info REST routes registered");
        router
    }
}
