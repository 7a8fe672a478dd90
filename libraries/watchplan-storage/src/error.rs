/// Storage-specific errors
use thiserror::Error;

/// Errors raised while opening or migrating the database.
///
/// Query-level errors inside the vertical slices surface as
/// `watchplan_core::WatchplanError` instead, so handlers deal with a single
/// error type.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),
}

impl From<StorageError> for watchplan_core::WatchplanError {
    fn from(err: StorageError) -> Self {
        watchplan_core::WatchplanError::storage(err.to_string())
    }
}
