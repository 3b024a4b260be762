//! Database connection pool and migration management.
//!
//! The service owns no data model of its own; the pool is shared by the
//! PostgreSQL repositories in [`crate::repository::postgres`].

use std::time::Duration;

use sqlx::{Pool, Postgres};

/// Type alias for PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// # Configuration
///
/// - Maximum connections: 5
/// - Acquire timeout: 5 seconds
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the server
/// cannot be reached.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// Creates the `profiles`, `research_jobs` and `user_sessions` tables when
/// they do not exist yet. Applied migrations are tracked in `_sqlx_migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
