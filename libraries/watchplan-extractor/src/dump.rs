//! Deserialization of `yt-dlp --dump-single-json` output and its mapping
//! into a [`PlaylistSnapshot`].
//!
//! Flat-playlist dumps frequently carry `null` durations; the mapping keeps
//! such entries (duration 0) and the coverage check decides whether a full
//! fetch is worth the extra time.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use watchplan_core::{PlaylistSnapshot, Video, VideoId};

/// Top-level playlist dump.
#[derive(Debug, Deserialize)]
pub struct PlaylistDump {
    pub id: String,
    pub title: Option<String>,
    pub channel: Option<String>,
    pub uploader: Option<String>,
    /// yt-dlp emits `null` for entries it failed to resolve.
    #[serde(default)]
    pub entries: Vec<Option<EntryDump>>,
}

/// One playlist entry as yt-dlp reports it.
#[derive(Debug, Deserialize)]
pub struct EntryDump {
    pub id: Option<String>,
    pub title: Option<String>,
    pub duration: Option<f64>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<ThumbnailDump>,
    /// `YYYYMMDD` when present.
    pub upload_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThumbnailDump {
    pub url: String,
}

impl EntryDump {
    /// Best available thumbnail: the direct field, else the last (largest)
    /// entry of the thumbnails list.
    fn pick_thumbnail(&self) -> String {
        if let Some(url) = &self.thumbnail {
            return url.clone();
        }
        self.thumbnails
            .last()
            .map(|t| t.url.clone())
            .unwrap_or_default()
    }

    /// `YYYYMMDD` upload date reformatted as ISO `YYYY-MM-DD`.
    fn published_at(&self) -> Option<String> {
        let raw = self.upload_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y%m%d")
            .ok()
            .map(|date| date.format("%Y-%m-%d").to_string())
    }
}

/// Convert a raw dump into a snapshot.
///
/// Null entries and entries without a video id are dropped; positions are
/// reassigned over the surviving entries so they stay dense.
pub fn snapshot_from_dump(dump: &PlaylistDump) -> PlaylistSnapshot {
    let videos: Vec<Video> = dump
        .entries
        .iter()
        .flatten()
        .filter(|entry| entry.id.as_deref().is_some_and(|id| !id.is_empty()))
        .enumerate()
        .map(|(position, entry)| Video {
            video_id: VideoId::new(entry.id.clone().unwrap_or_default()),
            title: entry
                .title
                .clone()
                .unwrap_or_else(|| format!("Video {}", position + 1)),
            duration_sec: entry.duration.map_or(0, |d| d.max(0.0).round() as u64),
            thumbnail_url: entry.pick_thumbnail(),
            position: position as u32,
            published_at: entry.published_at(),
        })
        .collect();

    let channel_title = dump
        .channel
        .clone()
        .or_else(|| dump.uploader.clone())
        .unwrap_or_default();

    PlaylistSnapshot::new(
        dump.id.clone(),
        dump.title.clone().unwrap_or_else(|| dump.id.clone()),
        channel_title,
        Utc::now(),
        videos,
    )
}

/// Percentage of videos with a known (non-zero) duration.
///
/// An empty snapshot counts as fully covered; there is nothing a full fetch
/// could recover.
pub fn duration_coverage_pct(snapshot: &PlaylistSnapshot) -> f64 {
    if snapshot.videos.is_empty() {
        return 100.0;
    }
    let known = snapshot
        .videos
        .iter()
        .filter(|video| video.duration_sec > 0)
        .count();
    known as f64 * 100.0 / snapshot.videos.len() as f64
}
