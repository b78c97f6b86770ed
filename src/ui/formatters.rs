use chrono::{DateTime, Local};

/// Format a duration in seconds (s, m, h)
pub fn format_seconds(secs: f64) -> String {
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else if secs < 3600.0 {
        format!("{:.1}m", secs / 60.0)
    } else {
        format!("{:.1}h", secs / 3600.0)
    }
}

/// Format megabytes in human-readable format (MB, GB)
pub fn format_mb(mb: f64) -> String {
    if mb < 1024.0 {
        format!("{:.1}MB", mb)
    } else {
        format!("{:.1}GB", mb / 1024.0)
    }
}

/// Format a unix timestamp in local time (YYYY-MM-DD HH:MM:SS)
pub fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "-".to_string(),
    }
}
