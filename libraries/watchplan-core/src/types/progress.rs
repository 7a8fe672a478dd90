/// Per-video completion tracking
use crate::types::VideoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Completion state of a single video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoProgress {
    /// Whether the video has been watched
    pub completed: bool,

    /// When it was marked complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl VideoProgress {
    /// A completed entry stamped with the given instant.
    pub fn completed_at(at: DateTime<Utc>) -> Self {
        Self {
            completed: true,
            completed_at: Some(at),
        }
    }
}

/// Mapping from video id to completion state.
///
/// A video absent from the map is not completed. Keys for videos that have
/// left the playlist are orphaned, not an error.
pub type ProgressMap = HashMap<VideoId, VideoProgress>;
