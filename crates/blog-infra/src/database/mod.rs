//! Database connection management, schema and SQL repositories.

mod connections;
mod sql_base;

pub mod entity;
pub mod schema;
pub mod sql_repo;

pub use connections::{DatabaseConfig, connect};
pub use schema::create_schema;
pub use sql_base::SqlRepository;
pub use sql_repo::{SqlCommentRepository, SqlPostRepository, SqlUserRepository};
