//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::pagination::Paginator;
use blog_core::ports::{Clock, Repositories, SystemClock};
use blog_core::services::{ListingService, MutationService};
use blog_infra::InMemoryStore;

#[cfg(feature = "postgres")]
use blog_infra::DatabaseConnections;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub listing: ListingService,
    pub mutations: MutationService,
    pub login_url: String,
    /// Name of the backing entity store, reported by the health check.
    pub store: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A configured database that cannot be reached is fatal. Only a missing
    /// `DATABASE_URL` selects the in-memory store.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        #[cfg(feature = "postgres")]
        let (repos, store) = match config.database.as_ref() {
            Some(db_config) => {
                let connections = DatabaseConnections::init(db_config).await.map_err(|e| {
                    tracing::error!("Failed to connect to database: {}", e);
                    std::io::Error::other(format!("database connection failed: {e}"))
                })?;
                (connections.repositories(), "postgres")
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (repos, store) = {
            if config.database.is_some() {
                return Err(std::io::Error::other(
                    "DATABASE_URL is set but the server was built without the postgres feature",
                ));
            }
            tracing::info!("Running without postgres feature - using in-memory store");
            in_memory()
        };

        let state = Self::from_repositories(repos, Arc::new(SystemClock), config, store);
        tracing::info!(store, "Application state initialized");
        Ok(state)
    }

    pub fn from_repositories(
        repos: Repositories,
        clock: Arc<dyn Clock>,
        config: &AppConfig,
        store: &'static str,
    ) -> Self {
        let paginator = Paginator::new(config.posts_per_page);
        Self {
            listing: ListingService::new(repos.clone(), clock.clone(), paginator),
            mutations: MutationService::new(repos, clock),
            login_url: config.login_url.clone(),
            store,
        }
    }
}

fn in_memory() -> (Repositories, &'static str) {
    (Repositories::from_store(Arc::new(InMemoryStore::new())), "memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_missing_database_url_uses_memory() {
        let state = AppState::new(&AppConfig::default()).await.unwrap();
        assert_eq!(state.store, "memory");
    }

    #[cfg(feature = "postgres")]
    #[actix_rt::test]
    async fn test_unreachable_database_is_fatal() {
        use blog_infra::DatabaseConfig;

        let config = AppConfig {
            database: Some(DatabaseConfig {
                url: "unsupported://nowhere/blog".to_string(),
                max_connections: 1,
                min_connections: 0,
            }),
            ..AppConfig::default()
        };

        assert!(AppState::new(&config).await.is_err());
    }
}
