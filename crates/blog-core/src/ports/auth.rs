//! Authentication ports: credential hashing and session tokens.

use chrono::{DateTime, Utc};

use crate::domain::UserId;

/// Claims carried by a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: UserId,
    /// Unique id of this session, used for revocation.
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

/// A freshly signed token together with its claims.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

/// Token service trait for session tokens.
pub trait TokenService: Send + Sync {
    /// Sign a new session token for a user.
    fn generate_token(&self, user_id: UserId) -> Result<IssuedToken, AuthError>;

    /// Validate signature, issuer and expiry, and decode the claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of newly issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service (the credential store).
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password into a self-describing, salted digest.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a digest.
    ///
    /// Malformed or unsupported digests never verify.
    fn verify(&self, password: &str, hash: &str) -> bool;

    /// Whether a digest should be replaced by a fresh `hash` after a
    /// successful verification.
    fn needs_rehash(&self, hash: &str) -> bool;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
