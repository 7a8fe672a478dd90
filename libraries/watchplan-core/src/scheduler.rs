//! Schedule builder
//!
//! Pure derivation of a day-by-day viewing schedule from a video list, a
//! plan configuration and a progress map. Total over its whole input domain:
//! malformed dates and out-of-range budgets are normalized at the boundary,
//! never rejected, so the surrounding read path cannot be interrupted by a
//! scheduling failure.
//!
//! The reference date ("today") is an explicit parameter. Callers take one
//! sample per invocation, which keeps results stable across a midnight
//! boundary and keeps this function testable without touching the clock.

use crate::types::{
    PlanConfig, PlaybackSpeed, ProgressMap, ScheduleResult, ScheduledDay, Video, VideoId,
};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

/// Watch time required for a video at the given playback speed.
///
/// `max(1, ceil(duration / speed))`, computed with the exact rational form
/// of the speed. The floor of one second keeps zero-duration videos (missing
/// metadata) schedulable instead of silently packing for free. Durations are
/// client-supplied, so the multiplication saturates instead of wrapping near
/// `u64::MAX`.
pub fn adjusted_duration_sec(duration_sec: u64, speed: PlaybackSpeed) -> u64 {
    let (num, den) = speed.ratio();
    duration_sec.saturating_mul(den).div_ceil(num).max(1)
}

/// Per-day budget in seconds, clamped to at least one second so every
/// configuration makes forward progress.
fn daily_budget_sec(plan: &PlanConfig) -> u64 {
    let budget = plan.minutes_per_day.saturating_mul(60);
    if budget < 1 {
        1
    } else {
        budget as u64
    }
}

/// The first day the schedule may use: the configured start date, but never
/// in the past. An unparsable date falls back to `today`.
fn effective_start_date(plan: &PlanConfig, today: NaiveDate) -> NaiveDate {
    NaiveDate::parse_from_str(&plan.start_date, "%Y-%m-%d")
        .unwrap_or(today)
        .max(today)
}

/// Build the schedule for one playlist.
///
/// Greedy first-fit-sequential packing: remaining videos are taken in
/// `position` order and appended to the current day until the next video
/// would exceed the daily budget, at which point the day is closed and the
/// next calendar day opened. A day holding no videos never defers its first
/// video, so even a video longer than the whole budget lands on exactly one
/// day.
///
/// Duplicate video ids are not deduplicated; they share one completion entry
/// through the map key.
pub fn build_schedule(
    videos: &[Video],
    plan: &PlanConfig,
    progress_map: &ProgressMap,
    today: NaiveDate,
) -> ScheduleResult {
    let speed = plan.playback_speed;
    let daily_adjusted_budget_sec = daily_budget_sec(plan);
    let start_date = effective_start_date(plan, today);

    // Position is the sequencing contract; the stable sort keeps input order
    // for equal positions.
    let mut ordered: Vec<&Video> = videos.iter().collect();
    ordered.sort_by_key(|video| video.position);

    let is_completed = |video: &Video| {
        progress_map
            .get(&video.video_id)
            .is_some_and(|progress| progress.completed)
    };

    let remaining: Vec<&Video> = ordered
        .iter()
        .copied()
        .filter(|video| !is_completed(video))
        .collect();

    let mut days: Vec<ScheduledDay> = Vec::new();
    let mut video_day_map: HashMap<VideoId, NaiveDate> = HashMap::new();
    let mut day_index: i64 = 0;
    let mut current_day = ScheduledDay {
        date: start_date,
        video_ids: Vec::new(),
        planned_duration_sec: 0,
    };

    for video in &remaining {
        let adjusted = adjusted_duration_sec(video.duration_sec, speed);
        let exceeds_budget = !current_day.video_ids.is_empty()
            && current_day.planned_duration_sec.saturating_add(adjusted)
                > daily_adjusted_budget_sec;

        if exceeds_budget {
            days.push(current_day);
            day_index += 1;
            current_day = ScheduledDay {
                date: start_date + Duration::days(day_index),
                video_ids: Vec::new(),
                planned_duration_sec: 0,
            };
        }

        current_day.video_ids.push(video.video_id.clone());
        current_day.planned_duration_sec = current_day.planned_duration_sec.saturating_add(adjusted);
        video_day_map.insert(video.video_id.clone(), current_day.date);
    }

    if !current_day.video_ids.is_empty() {
        days.push(current_day);
    }

    let end_date = days.last().map(|day| day.date);

    let total_videos = videos.len();
    let completed_videos = total_videos - remaining.len();
    let completion_rate = if total_videos == 0 {
        0.0
    } else {
        completed_videos as f64 / total_videos as f64
    };

    // Aggregate sums saturate for the same reason the adjustment does:
    // stored durations are arbitrary u64 values
    let total_duration_sec = videos
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(v.duration_sec));
    let remaining_duration_sec = remaining
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(v.duration_sec));
    let total_adjusted_duration_sec = videos.iter().fold(0u64, |acc, v| {
        acc.saturating_add(adjusted_duration_sec(v.duration_sec, speed))
    });
    let remaining_adjusted_duration_sec = remaining.iter().fold(0u64, |acc, v| {
        acc.saturating_add(adjusted_duration_sec(v.duration_sec, speed))
    });

    ScheduleResult {
        days,
        video_day_map,
        end_date,
        total_duration_sec,
        remaining_duration_sec,
        total_adjusted_duration_sec,
        remaining_adjusted_duration_sec,
        daily_adjusted_budget_sec,
        total_videos,
        remaining_videos: remaining.len(),
        completed_videos,
        completion_rate,
    }
}
