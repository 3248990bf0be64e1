//! In-memory session store, used when no Redis is configured.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::ports::{SessionStore, SessionStoreError};

/// Revoked sessions kept in a HashMap behind an async RwLock.
///
/// Revocations are lost on process restart, and are not shared between
/// server processes.
pub struct InMemorySessionStore {
    revoked: RwLock<HashMap<String, Instant>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            revoked: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn revoke(&self, session_id: &str, ttl: Duration) -> Result<(), SessionStoreError> {
        let expires_at = Instant::now() + ttl;
        let mut revoked = self.revoked.write().await;

        // Expired entries are dropped on every write.
        let now = Instant::now();
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(session_id.to_string(), expires_at);

        Ok(())
    }

    async fn is_revoked(&self, session_id: &str) -> Result<bool, SessionStoreError> {
        let revoked = self.revoked.read().await;
        Ok(revoked
            .get(session_id)
            .is_some_and(|exp| Instant::now() < *exp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke_and_check() {
        let store = InMemorySessionStore::new();
        assert!(!store.is_revoked("s1").await.unwrap());

        store.revoke("s1", Duration::from_secs(60)).await.unwrap();

        assert!(store.is_revoked("s1").await.unwrap());
        assert!(!store.is_revoked("s2").await.unwrap());
    }

    #[tokio::test]
    async fn test_revocation_expires() {
        let store = InMemorySessionStore::new();
        store.revoke("s1", Duration::from_millis(20)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!store.is_revoked("s1").await.unwrap());

        // The next write drops the stale entry.
        store.revoke("s2", Duration::from_secs(60)).await.unwrap();
        let revoked = store.revoked.read().await;
        assert_eq!(revoked.len(), 1);
        assert!(revoked.contains_key("s2"));
    }
}
