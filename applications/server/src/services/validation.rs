/// Request-level validation of plan configuration input
use crate::error::{Result, ServerError};
use chrono::NaiveDate;
use watchplan_core::PlaybackSpeed;

pub const MIN_MINUTES_PER_DAY: i64 = 1;
pub const MAX_MINUTES_PER_DAY: i64 = 600;

/// Validate a daily budget in minutes.
pub fn validate_minutes_per_day(minutes: i64) -> Result<i64> {
    if !(MIN_MINUTES_PER_DAY..=MAX_MINUTES_PER_DAY).contains(&minutes) {
        return Err(ServerError::BadRequest(format!(
            "minutes_per_day must be between {MIN_MINUTES_PER_DAY} and {MAX_MINUTES_PER_DAY}, got {minutes}"
        )));
    }
    Ok(minutes)
}

/// Validate an ISO `YYYY-MM-DD` start date.
pub fn validate_start_date(start_date: &str) -> Result<String> {
    NaiveDate::parse_from_str(start_date, "%Y-%m-%d").map_err(|_| {
        ServerError::BadRequest(format!(
            "start_date must be an ISO date (YYYY-MM-DD), got {start_date:?}"
        ))
    })?;
    Ok(start_date.to_string())
}

/// Validate a playback speed against the supported player speeds.
pub fn validate_playback_speed(speed: f64) -> Result<PlaybackSpeed> {
    PlaybackSpeed::try_from(speed).map_err(ServerError::BadRequest)
}
