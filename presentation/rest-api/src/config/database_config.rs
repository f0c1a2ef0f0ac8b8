use persistence::db::{DatabaseConfig, create_sqlite_pool, init_schema};
use sqlx::SqlitePool;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://inventory.db?mode=rwc";

/// Initialize database connection pool from environment variables
///
/// Environment variables:
/// - DATABASE_URL: SQLite connection string (default: "sqlite://inventory.db?mode=rwc")
///
/// # Errors
/// Returns error if the connection or schema creation fails
pub async fn init_database() -> anyhow::Result<SqlitePool> {
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    connect(&db_url).await
}

/// Opens a pool on `db_url` and makes sure the schema exists.
pub async fn connect(db_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = create_sqlite_pool(&DatabaseConfig::new(db_url.to_string())).await?;
    init_schema(&pool).await?;
    Ok(pool)
}
