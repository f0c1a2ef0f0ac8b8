use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database.connection_error")]
    ConnectionError,
    #[error("database.schema_error")]
    SchemaError,
}

/// Configuration for the database connection
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default values
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

const CREATE_PRODUCTS: &str = r#"CREATE TABLE IF NOT EXISTS products (
    id BLOB PRIMARY KEY NOT NULL,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    location TEXT NOT NULL,
    quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
    price TEXT NOT NULL DEFAULT '0',
    category TEXT NOT NULL DEFAULT 'General',
    image_path TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#;

// Rows are never deleted so a code cannot be issued twice.
const CREATE_ISSUED_CODES: &str = r#"CREATE TABLE IF NOT EXISTS issued_codes (
    code TEXT PRIMARY KEY NOT NULL,
    issued_at TEXT NOT NULL
)"#;

const CREATE_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_products_name ON products(name)",
    "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category)",
];

/// Creates a SQLite connection pool
pub async fn create_sqlite_pool(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.connection_string)
        .await
        .map_err(|_| DatabaseError::ConnectionError)?;

    Ok(pool)
}

/// Creates the product tables if missing (idempotent)
pub async fn init_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
    for statement in [CREATE_PRODUCTS, CREATE_ISSUED_CODES]
        .into_iter()
        .chain(CREATE_INDEXES)
    {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|_| DatabaseError::SchemaError)?;
    }

    info!("Product schema ready");
    Ok(())
}
