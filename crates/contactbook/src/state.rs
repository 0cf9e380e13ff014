//! Application state with repository-based storage.
//!
//! Holds the repository trait objects shared by every request handler. The
//! concrete backend is chosen at compile time via feature flags.

use std::{sync::Arc, time::Duration};

use contactbook_core::pagination::PaginationConfig;
use contactbook_core::storage::{ContactRepository, UserRepository};

use crate::config::Config;

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// User repository.
    pub user_repo: Arc<dyn UserRepository>,
    /// Contact item repository (same backend as `user_repo`).
    pub contact_repo: Arc<dyn ContactRepository>,
    /// Page size bounds for `GET /users/`.
    pub pagination: PaginationConfig,
    /// Requests running longer than this are answered with 408.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState from a single backend implementing both traits.
    pub fn build<R>(repo: Arc<R>, config: &Config) -> Self
    where
        R: UserRepository + ContactRepository + 'static,
    {
        Self {
            user_repo: repo.clone(),
            contact_repo: repo,
            pagination: config.pagination(),
            request_timeout: config.request_timeout(),
        }
    }
}

// ============================================================================
// Factory functions for each storage backend
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::info!("Using in-memory storage");
            Ok(Self::build(Arc::new(InMemoryRepository::new()), config))
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
            let repo = SqliteRepository::new(&config.sqlite_path).await?;
            Ok(Self::build(Arc::new(repo), config))
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// In-memory state with default configuration, for tests.
    fn default() -> Self {
        Self::build(
            Arc::new(crate::storage::InMemoryRepository::new()),
            &Config::default(),
        )
    }
}
