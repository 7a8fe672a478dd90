/// Plan configuration domain types
use serde::{Deserialize, Serialize};

/// Playback speed multiplier.
///
/// A closed set so an out-of-range or zero speed is unrepresentable; stored
/// values that do not match any variant normalize to 1x at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum PlaybackSpeed {
    /// 1x
    Normal,
    /// 1.5x
    OneAndAHalf,
    /// 1.75x
    OneAndThreeQuarters,
    /// 2x
    Double,
}

impl PlaybackSpeed {
    /// The speed as an exact ratio `(numerator, denominator)`.
    ///
    /// Watch-time adjustment divides durations by the speed; keeping the
    /// ratio exact avoids float rounding in the ceil.
    pub fn ratio(self) -> (u64, u64) {
        match self {
            PlaybackSpeed::Normal => (1, 1),
            PlaybackSpeed::OneAndAHalf => (3, 2),
            PlaybackSpeed::OneAndThreeQuarters => (7, 4),
            PlaybackSpeed::Double => (2, 1),
        }
    }

    /// The speed as a float, for display and storage.
    pub fn as_f64(self) -> f64 {
        match self {
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::OneAndAHalf => 1.5,
            PlaybackSpeed::OneAndThreeQuarters => 1.75,
            PlaybackSpeed::Double => 2.0,
        }
    }

    /// Parse a stored multiplier, normalizing anything unknown to 1x.
    pub fn from_f64(value: f64) -> Self {
        Self::try_from(value).unwrap_or(PlaybackSpeed::Normal)
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        PlaybackSpeed::Normal
    }
}

impl TryFrom<f64> for PlaybackSpeed {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        match value {
            v if v == 1.0 => Ok(PlaybackSpeed::Normal),
            v if v == 1.5 => Ok(PlaybackSpeed::OneAndAHalf),
            v if v == 1.75 => Ok(PlaybackSpeed::OneAndThreeQuarters),
            v if v == 2.0 => Ok(PlaybackSpeed::Double),
            other => Err(format!(
                "invalid playback speed {other}; expected 1, 1.5, 1.75 or 2"
            )),
        }
    }
}

impl From<PlaybackSpeed> for f64 {
    fn from(speed: PlaybackSpeed) -> Self {
        speed.as_f64()
    }
}

/// Per-playlist viewing plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Daily time budget in minutes (API-validated to 1..=600; the scheduler
    /// itself tolerates any stored value)
    pub minutes_per_day: i64,

    /// First day of the plan, `YYYY-MM-DD`; an unparsable value falls back
    /// to "today" at schedule time
    pub start_date: String,

    /// Playback speed multiplier
    pub playback_speed: PlaybackSpeed,
}

/// Partial update of a [`PlanConfig`]; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanConfigPatch {
    pub minutes_per_day: Option<i64>,
    pub start_date: Option<String>,
    pub playback_speed: Option<PlaybackSpeed>,
}

impl PlanConfigPatch {
    /// True when no field is set (rejected by the API layer).
    pub fn is_empty(&self) -> bool {
        self.minutes_per_day.is_none()
            && self.start_date.is_none()
            && self.playback_speed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_speed_round_trips_through_json() {
        for (speed, text) in [
            (PlaybackSpeed::Normal, "1.0"),
            (PlaybackSpeed::OneAndAHalf, "1.5"),
            (PlaybackSpeed::OneAndThreeQuarters, "1.75"),
            (PlaybackSpeed::Double, "2.0"),
        ] {
            let json = serde_json::to_string(&speed).unwrap();
            assert_eq!(json, text);
            let parsed: PlaybackSpeed = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, speed);
        }

        // Integer literals deserialize too
        let parsed: PlaybackSpeed = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, PlaybackSpeed::Double);
    }

    #[test]
    fn unknown_speed_is_rejected_by_serde_but_normalized_from_storage() {
        assert!(serde_json::from_str::<PlaybackSpeed>("3").is_err());
        assert_eq!(PlaybackSpeed::from_f64(0.0), PlaybackSpeed::Normal);
        assert_eq!(PlaybackSpeed::from_f64(1.75), PlaybackSpeed::OneAndThreeQuarters);
    }

    #[test]
    fn patch_emptiness() {
        assert!(PlanConfigPatch::default().is_empty());
        let patch = PlanConfigPatch {
            minutes_per_day: Some(30),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
