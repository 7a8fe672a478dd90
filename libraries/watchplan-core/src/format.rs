//! Human-readable duration formatting for presentation layers.

/// Format a duration in seconds as `2h 05m`, `45m 10s` or `30s`.
pub fn format_duration_sec(total_sec: u64) -> String {
    let hours = total_sec / 3600;
    let minutes = (total_sec % 3600) / 60;
    let seconds = total_sec % 60;

    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_duration_sec(0), "0s");
        assert_eq!(format_duration_sec(59), "59s");
        assert_eq!(format_duration_sec(60), "1m 00s");
        assert_eq!(format_duration_sec(610), "10m 10s");
        assert_eq!(format_duration_sec(3600), "1h 00m");
        assert_eq!(format_duration_sec(7500), "2h 05m");
    }
}
