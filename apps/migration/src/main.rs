//! Migration CLI tool.
//!
//! `cargo run -p migration -- up` applies pending migrations to
//! `DATABASE_URL`; see `--help` for the other commands.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    cli::run_cli(migration::Migrator).await;
}
