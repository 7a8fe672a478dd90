/// Core error types for Watchplan
use thiserror::Error;

/// Result type alias using `WatchplanError`
pub type Result<T> = std::result::Result<T, WatchplanError>;

/// Core error type for Watchplan
#[derive(Error, Debug)]
pub enum WatchplanError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Playlist metadata extraction errors
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Permission denied
    #[error("Permission denied")]
    PermissionDenied,

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl WatchplanError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a duplicate entry error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for WatchplanError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
