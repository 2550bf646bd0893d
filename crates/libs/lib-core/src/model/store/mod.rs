//! # Database Store
//!
//! Database connection pool, the [`CredentialStore`] abstraction, and its
//! implementations.

// region: --- Modules
pub mod credential_store;
pub mod memory;
pub mod models;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use credential_store::{CredentialStore, SqliteCredentialStore};
pub use memory::MemoryCredentialStore;
pub use models::{User, UserForCreate};
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool, creating the database file if missing.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// In-memory database with the real migrations applied.
#[cfg(test)]
pub(crate) async fn setup_test_db() -> DbPool {
    // Every connection to `sqlite::memory:` is a separate database
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
// endregion: --- Types and Functions
