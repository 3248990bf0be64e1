//! Schema derived from the entities.
//!
//! The `migration` binary and the server's start-up auto-migration both build
//! their DDL here so the tables always match the entity definitions.

use sea_orm::sea_query::{Index, IndexCreateStatement, TableCreateStatement};
use sea_orm::{ConnectionTrait, DbBackend, DbConn, DbErr, Schema};

use super::entity::{comment, post, user};

/// `CREATE TABLE IF NOT EXISTS` for every table, parents first.
pub fn table_statements(backend: DbBackend) -> Vec<TableCreateStatement> {
    let schema = Schema::new(backend);
    vec![
        schema
            .create_table_from_entity(user::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(post::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(comment::Entity)
            .if_not_exists()
            .to_owned(),
    ]
}

/// Indexes backing the reverse lookups (a post's comments, a user's posts).
pub fn index_statements() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .name("idx_comments_blog_id")
            .table(comment::Entity)
            .col(comment::Column::BlogId)
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_comments_author_id")
            .table(comment::Entity)
            .col(comment::Column::AuthorId)
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_blog_posts_author_id")
            .table(post::Entity)
            .col(post::Column::AuthorId)
            .if_not_exists()
            .to_owned(),
    ]
}

/// Create all tables and indexes that do not exist yet.
pub async fn create_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    for stmt in table_statements(backend) {
        db.execute(backend.build(&stmt)).await?;
    }
    for stmt in index_statements() {
        db.execute(backend.build(&stmt)).await?;
    }

    tracing::info!(?backend, "Database schema ready");
    Ok(())
}
