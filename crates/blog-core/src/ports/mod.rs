//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod session;

pub use auth::{AuthError, IssuedToken, PasswordService, TokenClaims, TokenService};
pub use repository::{BaseRepository, CommentRepository, PostRepository, UserRepository};
pub use session::{SessionStore, SessionStoreError};
