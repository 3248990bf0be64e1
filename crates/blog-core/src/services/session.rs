//! Session manager: turns logins into tokens and tokens back into principals.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::{Principal, User, UserId};
use crate::error::DomainError;
use crate::ports::{SessionStore, TokenService, UserRepository};

/// Slack added to revocation entries so they outlive any validation leeway.
const REVOCATION_GRACE: Duration = Duration::from_secs(60);

/// A logged-in session as handed to the client.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

pub struct SessionManager {
    tokens: Arc<dyn TokenService>,
    revoked: Arc<dyn SessionStore>,
    users: Arc<dyn UserRepository>,
}

impl SessionManager {
    pub fn new(
        tokens: Arc<dyn TokenService>,
        revoked: Arc<dyn SessionStore>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            tokens,
            revoked,
            users,
        }
    }

    /// Lifetime of new sessions, in seconds.
    pub fn expiration_seconds(&self) -> i64 {
        self.tokens.expiration_seconds()
    }

    /// Establish a session for an already authenticated user.
    pub fn login(&self, user: &User) -> Result<Session, DomainError> {
        let issued = self
            .tokens
            .generate_token(user.id)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(user_id = user.id, "Session established");

        Ok(Session {
            token: issued.token,
            user_id: issued.claims.user_id,
            expires_at: issued.claims.expires_at,
        })
    }

    /// Resolve the principal behind a token.
    ///
    /// Anything short of a valid, unrevoked token for an existing user is
    /// `Anonymous`. Only store failures while loading the user are errors.
    pub async fn current_principal(&self, token: Option<&str>) -> Result<Principal, DomainError> {
        let Some(token) = token else {
            return Ok(Principal::Anonymous);
        };

        let claims = match self.tokens.validate_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                return Ok(Principal::Anonymous);
            }
        };

        match self.revoked.is_revoked(&claims.session_id).await {
            Ok(false) => {}
            Ok(true) => {
                tracing::debug!(user_id = claims.user_id, "Session was logged out");
                return Ok(Principal::Anonymous);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session store unavailable, treating as anonymous");
                return Ok(Principal::Anonymous);
            }
        }

        match self.users.find_by_id(claims.user_id).await? {
            Some(user) => Ok(Principal::User(user)),
            None => {
                tracing::debug!(user_id = claims.user_id, "Session refers to a missing user");
                Ok(Principal::Anonymous)
            }
        }
    }

    /// End a session. Invalid, expired or already revoked tokens are a no-op.
    pub async fn logout(&self, token: &str) -> Result<(), DomainError> {
        let claims = match self.tokens.validate_token(token) {
            Ok(claims) => claims,
            Err(_) => return Ok(()),
        };

        let remaining = (claims.expires_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);

        self.revoked
            .revoke(&claims.session_id, remaining + REVOCATION_GRACE)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(user_id = claims.user_id, "Session logged out");
        Ok(())
    }
}
