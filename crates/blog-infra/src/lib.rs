//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! SQL repositories, the schema builder, password and token services, and
//! session revocation stores.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - SQLite and auth only, in-memory session store
//! - `sqlite` - SQLite driver for SeaORM
//! - `postgres` - PostgreSQL driver for SeaORM
//! - `auth` - JWT + Argon2 authentication (with legacy PBKDF2 verification)
//! - `redis` - Redis-backed session revocation

pub mod database;
pub mod session;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - SQL
pub use database::{
    DatabaseConfig, SqlCommentRepository, SqlPostRepository, SqlUserRepository, connect,
    create_schema,
};

// Re-exports - sessions
pub use session::InMemorySessionStore;
#[cfg(feature = "redis")]
pub use session::{RedisConfig, RedisSessionStore};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
