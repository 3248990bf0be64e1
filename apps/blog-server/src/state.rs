//! Application state - shared across all handlers.

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::DbConn;

use blog_core::domain::AdminPolicy;
use blog_core::ports::{PasswordService, SessionStore, TokenService};
use blog_core::services::{ContentGraph, IdentityDirectory, SessionManager};
use blog_infra::{
    Argon2PasswordService, InMemorySessionStore, JwtTokenService, SqlCommentRepository,
    SqlPostRepository, SqlUserRepository, connect,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub identity: Arc<IdentityDirectory>,
    pub sessions: Arc<SessionManager>,
    pub content: Arc<ContentGraph>,
}

impl AppState {
    /// Connect to the database, migrate it if configured, and wire the services.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db = connect(&config.database).await?;

        if config.auto_migrate {
            Migrator::up(&db, None).await?;
            tracing::info!("Database migrations applied");
        }

        let revoked = Self::session_store(config).await;
        let state = Self::from_parts(
            db,
            Arc::new(JwtTokenService::new(config.jwt.clone())),
            Arc::new(Argon2PasswordService::new()),
            revoked,
            config.admin_policy.clone(),
        );

        tracing::info!(admin_policy = ?config.admin_policy, "Application state initialized");
        Ok(state)
    }

    /// Wire the services over an open connection.
    pub fn from_parts(
        db: DbConn,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        revoked: Arc<dyn SessionStore>,
        admin_policy: AdminPolicy,
    ) -> Self {
        let users = Arc::new(SqlUserRepository::new(db.clone()));
        let posts = Arc::new(SqlPostRepository::new(db.clone()));
        let comments = Arc::new(SqlCommentRepository::new(db.clone()));

        Self {
            db,
            identity: Arc::new(IdentityDirectory::new(users.clone(), passwords, admin_policy)),
            sessions: Arc::new(SessionManager::new(tokens, revoked, users.clone())),
            content: Arc::new(ContentGraph::new(posts, comments, users)),
        }
    }

    async fn session_store(config: &AppConfig) -> Arc<dyn SessionStore> {
        #[cfg(feature = "redis")]
        {
            use blog_infra::{RedisConfig, RedisSessionStore};

            if let Some(url) = &config.redis_url {
                let redis_config = RedisConfig {
                    url: url.clone(),
                    ..RedisConfig::default()
                };
                match RedisSessionStore::new(redis_config).await {
                    Ok(store) => return Arc::new(store),
                    Err(e) => tracing::error!(
                        error = %e,
                        "Redis unavailable, logouts will only be honoured by this process"
                    ),
                }
            }
        }

        #[cfg(not(feature = "redis"))]
        {
            if config.redis_url.is_some() {
                tracing::warn!("REDIS_URL is set but the redis feature is disabled");
            }
        }

        tracing::info!("Using in-memory session store");
        Arc::new(InMemorySessionStore::new())
    }
}
