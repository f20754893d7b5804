#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

#[cfg(feature = "postgres")]
use blog_core::ports::Repositories;

/// Configuration for the database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Connection pool to the entity store database.
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    pub main: DbConn,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Initialize the connection pool from configuration.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connections...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!("Database connected (pool: {})", config.max_connections);

        Ok(Self { main })
    }

    /// Repositories sharing this pool.
    pub fn repositories(&self) -> Repositories {
        use std::sync::Arc;

        use super::postgres_repo::{
            PostgresCategoryRepository, PostgresCommentRepository, PostgresLocationRepository,
            PostgresPostRepository, PostgresUserRepository,
        };

        Repositories {
            users: Arc::new(PostgresUserRepository::new(self.main.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(self.main.clone())),
            locations: Arc::new(PostgresLocationRepository::new(self.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(self.main.clone())),
            comments: Arc::new(PostgresCommentRepository::new(self.main.clone())),
        }
    }
}
