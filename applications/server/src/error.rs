/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Authorization failed: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<watchplan_core::WatchplanError> for ServerError {
    fn from(err: watchplan_core::WatchplanError) -> Self {
        use watchplan_core::WatchplanError;
        match err {
            WatchplanError::NotFound { entity, id } => {
                ServerError::NotFound(format!("{entity} not found: {id}"))
            }
            WatchplanError::Duplicate(msg) => ServerError::Conflict(msg),
            WatchplanError::InvalidInput(msg) => ServerError::BadRequest(msg),
            WatchplanError::Extraction(msg) => ServerError::Extraction(msg),
            WatchplanError::PermissionDenied => {
                ServerError::Unauthorized("Permission denied".to_string())
            }
            other => ServerError::Database(other.to_string()),
        }
    }
}

impl From<watchplan_extractor::ExtractorError> for ServerError {
    fn from(err: watchplan_extractor::ExtractorError) -> Self {
        use watchplan_extractor::ExtractorError;
        match err {
            // A missing or private playlist is the caller's problem
            ExtractorError::PlaylistUnavailable(msg) => {
                ServerError::NotFound(format!("Playlist unavailable: {msg}"))
            }
            other => ServerError::Extraction(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::Unauthorized(msg) => (StatusCode::FORBIDDEN, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServerError::Extraction(ref msg) => {
                tracing::error!("Extraction error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Playlist extraction failed".to_string(),
                )
            }
            ServerError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
            ServerError::Jwt(ref e) => {
                tracing::error!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
