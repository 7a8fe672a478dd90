//! Watchplan Storage
//!
//! `SQLite` persistence layer for Watchplan.
//!
//! This crate stores tracked playlists, their snapshot videos and per-video
//! completion for multiple users. It never stores schedules: those are
//! derived by `watchplan-core` on every read.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries and logic
//!   (`users`, `playlists`, `progress`, `migration`)
//! - **Multi-User**: all playlist data is keyed by owner from day one
//! - **Embedded Migrations**: schema ships inside the binary
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = watchplan_storage::create_pool("sqlite://watchplan.db").await?;
//! watchplan_storage::run_migrations(&pool).await?;
//!
//! let states = watchplan_storage::playlists::list_states(
//!     &pool,
//!     &watchplan_core::UserId::new("user-1"),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod migration;
pub mod playlists;
pub mod progress;
pub mod users;

pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://watchplan.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))
}
