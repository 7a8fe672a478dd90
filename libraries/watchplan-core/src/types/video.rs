/// Video and playlist snapshot domain types
use crate::types::VideoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single video inside an imported playlist snapshot.
///
/// Ordering by `position` is the sequencing contract for scheduling, never
/// the vector index, which can diverge after a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// YouTube video identifier
    pub video_id: VideoId,

    /// Video title
    pub title: String,

    /// Raw duration in seconds (0 when the extractor had no metadata)
    pub duration_sec: u64,

    /// Thumbnail URL, may be empty
    pub thumbnail_url: String,

    /// Zero-based ordering index within the playlist
    pub position: u32,

    /// Upload date (`YYYY-MM-DD`), when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

/// Point-in-time snapshot of a playlist as returned by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSnapshot {
    /// YouTube playlist identifier
    pub playlist_id: String,

    /// Playlist title
    pub title: String,

    /// Channel that owns the playlist
    pub channel_title: String,

    /// When the snapshot was fetched
    pub fetched_at: DateTime<Utc>,

    /// Videos in position order
    pub videos: Vec<Video>,

    /// Sum of raw durations over all videos
    pub total_duration_sec: u64,

    /// Number of videos in the snapshot
    pub video_count: usize,
}

impl PlaylistSnapshot {
    /// Build a snapshot from an ordered video list, deriving the aggregates.
    pub fn new(
        playlist_id: impl Into<String>,
        title: impl Into<String>,
        channel_title: impl Into<String>,
        fetched_at: DateTime<Utc>,
        videos: Vec<Video>,
    ) -> Self {
        // Saturating: durations are not validated upstream of this type
        let total_duration_sec = videos
            .iter()
            .fold(0u64, |acc, v| acc.saturating_add(v.duration_sec));
        let video_count = videos.len();
        Self {
            playlist_id: playlist_id.into(),
            title: title.into(),
            channel_title: channel_title.into(),
            fetched_at,
            videos,
            total_duration_sec,
            video_count,
        }
    }
}
