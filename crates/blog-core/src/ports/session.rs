//! Session revocation port.

use std::time::Duration;

use async_trait::async_trait;

/// Records sessions that were logged out before their token expired.
///
/// Entries only need to outlive the token they revoke, so every write
/// carries a TTL.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Mark a session as revoked for `ttl`.
    async fn revoke(&self, session_id: &str, ttl: Duration) -> Result<(), SessionStoreError>;

    /// Whether a session has been revoked.
    async fn is_revoked(&self, session_id: &str) -> Result<bool, SessionStoreError>;
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
