//! Application configuration loaded from environment variables.

use std::env;

use blog_core::pagination::DEFAULT_PAGE_SIZE;
use blog_infra::DatabaseConfig;

const DEFAULT_LOGIN_URL: &str = "/auth/login/";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub posts_per_page: usize,
    /// Where anonymous writers are sent.
    pub login_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            posts_per_page: DEFAULT_PAGE_SIZE,
            login_url: DEFAULT_LOGIN_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            database,
            posts_per_page: parse_var("POSTS_PER_PAGE")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.posts_per_page),
            login_url: env::var("LOGIN_URL").unwrap_or(defaults.login_url),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
