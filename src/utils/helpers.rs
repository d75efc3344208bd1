/// Helper utilities shared by the sampler, the view and the CLI

use chrono::{Local, TimeZone};

pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Convert bytes to GB (2^30), rounded to 2 decimals
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round_to(bytes as f64 / BYTES_PER_GB, 2)
}

/// Format epoch seconds as `YYYY-MM-DD HH:MM:SS` in the given timezone
pub fn format_timestamp_in<Tz: TimeZone>(epoch_secs: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_opt(epoch_secs, 0)
        .earliest()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Format epoch seconds as local date-time
pub fn format_local_timestamp(epoch_secs: i64) -> Option<String> {
    format_timestamp_in(epoch_secs, &Local)
}

/// Shorten a string to `max` characters, marking the cut with `…`
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
