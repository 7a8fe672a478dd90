/// Extractor-specific errors
use thiserror::Error;

/// Result type alias using `ExtractorError`
pub type Result<T> = std::result::Result<T, ExtractorError>;

/// Extraction error types
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The yt-dlp binary could not be spawned
    #[error("yt-dlp binary not found: {0}")]
    BinaryNotFound(String),

    /// The playlist does not exist or is not accessible
    #[error("Playlist unavailable: {0}")]
    PlaylistUnavailable(String),

    /// yt-dlp exited unsuccessfully
    #[error("yt-dlp execution failed: {0}")]
    Execution(String),

    /// yt-dlp did not finish within the configured timeout
    #[error("yt-dlp timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The dump output could not be parsed
    #[error("Failed to parse yt-dlp output: {0}")]
    Parse(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ExtractorError> for watchplan_core::WatchplanError {
    fn from(err: ExtractorError) -> Self {
        watchplan_core::WatchplanError::extraction(err.to_string())
    }
}
