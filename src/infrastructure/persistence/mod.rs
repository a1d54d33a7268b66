//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! prepared statements.
//!
//! # Repositories
//!
//! - [`SqliteLocationRepository`] - Geolocation record storage and retrieval

pub mod sqlite_location_repository;

pub use sqlite_location_repository::SqliteLocationRepository;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Embedded schema migrations from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens a connection pool for `database_url`.
///
/// File databases are created if missing and use WAL journaling. In-memory
/// databases exist per connection, so their connections are never recycled;
/// use `max_connections = 1` to share one in-memory database.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the first connection fails.
pub async fn connect_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let mut options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout);
    if in_memory {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    pool_options.connect_with(options).await
}
