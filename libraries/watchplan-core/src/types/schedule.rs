/// Derived schedule types
///
/// Never persisted; a `ScheduleResult` is recomputed on every read and
/// discarded after serialization.
use crate::types::VideoId;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// One calendar day of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledDay {
    /// The calendar date of this day
    pub date: NaiveDate,

    /// Videos assigned to this day, in position order
    pub video_ids: Vec<VideoId>,

    /// Sum of speed-adjusted durations assigned to this day
    pub planned_duration_sec: u64,
}

/// Aggregate schedule over a playlist snapshot, plan and progress map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleResult {
    /// Days holding the remaining (non-completed) videos, in order
    pub days: Vec<ScheduledDay>,

    /// Which day each remaining video landed on
    pub video_day_map: HashMap<VideoId, NaiveDate>,

    /// Date of the last day, `None` when nothing remains to schedule
    pub end_date: Option<NaiveDate>,

    /// Raw duration sum over all videos
    pub total_duration_sec: u64,

    /// Raw duration sum over remaining videos
    pub remaining_duration_sec: u64,

    /// Speed-adjusted duration sum over all videos
    pub total_adjusted_duration_sec: u64,

    /// Speed-adjusted duration sum over remaining videos
    pub remaining_adjusted_duration_sec: u64,

    /// The clamped per-day budget used, in seconds
    pub daily_adjusted_budget_sec: u64,

    /// Total number of videos in the snapshot
    pub total_videos: usize,

    /// Number of videos not yet completed
    pub remaining_videos: usize,

    /// Number of videos marked complete
    pub completed_videos: usize,

    /// `completed / total`, 0 when the snapshot is empty
    pub completion_rate: f64,
}
