//! JWT session token service.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::domain::UserId;
use blog_core::ports::{AuthError, IssuedToken, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";
const DEFAULT_ISSUER: &str = "quill-blog";
const DEFAULT_EXPIRATION_HOURS: i64 = 24;
/// Longest session lifetime accepted from the environment (one year).
const MAX_EXPIRATION_HOURS: i64 = 24 * 366;

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: DEFAULT_EXPIRATION_HOURS,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_HOURS` and `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());

        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            secret,
            expiration_hours: expiration_hours(std::env::var("JWT_EXPIRATION_HOURS").ok()),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string()),
        }
    }
}

/// Positive hour count, capped at [`MAX_EXPIRATION_HOURS`].
fn expiration_hours(raw: Option<String>) -> i64 {
    let Some(hours) = raw
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|hours| *hours > 0)
    else {
        return DEFAULT_EXPIRATION_HOURS;
    };

    if hours > MAX_EXPIRATION_HOURS {
        tracing::warn!(
            requested = hours,
            max = MAX_EXPIRATION_HOURS,
            "JWT_EXPIRATION_HOURS too large, capping"
        );
        return MAX_EXPIRATION_HOURS;
    }
    hours
}

/// Wire format of the session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    jti: String, // session id
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-based token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(JwtConfig::from_env())
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_id: UserId) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let exp = TimeDelta::try_hours(self.config.expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AuthError::InvalidToken("token lifetime out of range".to_string()))?;
        let session_id = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: user_id.to_string(),
            jti: session_id.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(IssuedToken {
            token,
            claims: TokenClaims {
                user_id,
                session_id,
                expires_at: timestamp_to_datetime(claims.exp)?,
            },
        })
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let user_id: UserId = token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken("subject is not a user id".to_string()))?;

        Ok(TokenClaims {
            user_id,
            session_id: token_data.claims.jti,
            expires_at: timestamp_to_datetime(token_data.claims.exp)?,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_hours.saturating_mul(3600)
    }
}

fn timestamp_to_datetime(ts: i64) -> Result<DateTime<Utc>, AuthError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| AuthError::InvalidToken("expiry out of range".to_string()))
}
