//! Application configuration loaded from environment variables.

use std::env;

use blog_core::domain::AdminPolicy;
use blog_infra::{DatabaseConfig, JwtConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Apply pending migrations on start-up.
    pub auto_migrate: bool,
    pub jwt: JwtConfig,
    pub admin_policy: AdminPolicy,
    /// Shared revocation store; in-memory when unset.
    pub redis_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(defaults.max_connections),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(defaults.min_connections),
            sqlx_logging: flag("DB_LOG_STATEMENTS").unwrap_or(false),
        };

        let admin_policy = match non_empty_var("ADMIN_EMAIL") {
            Some(email) => AdminPolicy::Email(email),
            None => AdminPolicy::FirstAccount,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            auto_migrate: flag("DB_AUTO_MIGRATE").unwrap_or(true),
            jwt: JwtConfig::from_env(),
            admin_policy,
            redis_url: non_empty_var("REDIS_URL"),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | "off"))
}
