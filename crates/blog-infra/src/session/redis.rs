//! Redis session store, shared by every server process.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use blog_core::ports::{SessionStore, SessionStoreError};

const KEY_PREFIX: &str = "quill:session:revoked:";

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    pub connect_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// `REDIS_URL` and `REDIS_CONNECT_TIMEOUT_SECS`; `None` without a URL.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("REDIS_URL").ok().filter(|u| !u.is_empty())?;
        Some(Self {
            url,
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        })
    }
}

/// Redis-backed session store.
///
/// Uses a connection manager for automatic reconnection.
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    pub async fn new(config: RedisConfig) -> Result<Self, SessionStoreError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| SessionStoreError::Connection(e.to_string()))?;

        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| SessionStoreError::Connection("Connection timed out".to_string()))?
            .map_err(|e| SessionStoreError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis session store");

        Ok(Self { conn })
    }

    fn key(session_id: &str) -> String {
        format!("{KEY_PREFIX}{session_id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn revoke(&self, session_id: &str, ttl: Duration) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(Self::key(session_id), 1u8, ttl.as_secs().max(1))
            .await
            .map_err(|e| SessionStoreError::Operation(e.to_string()))
    }

    async fn is_revoked(&self, session_id: &str) -> Result<bool, SessionStoreError> {
        let mut conn = self.conn.clone();
        conn.exists::<_, bool>(Self::key(session_id))
            .await
            .map_err(|e| SessionStoreError::Operation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_test_store() -> Option<RedisSessionStore> {
        let config = RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
        };

        RedisSessionStore::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_revoke() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };

        let session_id = uuid::Uuid::new_v4().to_string();
        assert!(!store.is_revoked(&session_id).await.unwrap());

        store
            .revoke(&session_id, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(store.is_revoked(&session_id).await.unwrap());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!store.is_revoked(&session_id).await.unwrap());
    }
}
