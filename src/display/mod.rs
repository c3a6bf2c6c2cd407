//! Cell formatting shared by the list screens.

use jiff::Timestamp;
use jiff::civil::{Date, DateTime};
use owo_colors::OwoColorize;

/// Format a server date or timestamp as `Mar 05, 2024`.
///
/// Accepts RFC 3339 timestamps (rendered in UTC), civil datetimes and plain
/// dates. Anything else is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return ts.strftime("%b %d, %Y").to_string();
    }
    if let Ok(dt) = raw.parse::<DateTime>() {
        return dt.strftime("%b %d, %Y").to_string();
    }
    match raw.parse::<Date>() {
        Ok(date) => date.strftime("%b %d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Format a server timestamp as a time of day (`14:05`).
pub fn format_time(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return ts.strftime("%H:%M").to_string();
    }
    match raw.parse::<DateTime>() {
        Ok(dt) => dt.strftime("%H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

pub fn format_optional(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Status badge such as `[confirmed]`, colored by what the status means.
pub fn status_badge(status: &str, color: bool) -> String {
    let badge = format!("[{}]", status);
    if !color {
        return badge;
    }
    match status.to_ascii_lowercase().as_str() {
        "confirmed" | "available" | "completed" | "paid" | "present" | "served" | "active"
        | "checked-in" | "yes" => badge.green().to_string(),
        "pending" | "preparing" | "late" | "partial" | "half-day" => badge.yellow().to_string(),
        "cancelled" | "failed" | "absent" | "no" => badge.red().to_string(),
        "occupied" | "reserved" => badge.cyan().to_string(),
        "maintenance" => badge.magenta().to_string(),
        _ => badge.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2024-03-05"), "Mar 05, 2024");
        assert_eq!(format_date("2024-03-05T22:15:00Z"), "Mar 05, 2024");
        assert_eq!(format_date("2024-03-05T22:15:00.123Z"), "Mar 05, 2024");
        assert_eq!(format_date("2024-03-05T08:00:00"), "Mar 05, 2024");
        assert_eq!(format_date("someday"), "someday");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("2024-03-05T14:05:00Z"), "14:05");
        assert_eq!(format_time("n/a"), "n/a");
    }

    #[test]
    fn test_plain_badge() {
        assert_eq!(status_badge("confirmed", false), "[confirmed]");
        assert!(status_badge("confirmed", true).contains("confirmed"));
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some("101")), "101");
        assert_eq!(format_optional(Some(" ")), "-");
        assert_eq!(format_optional(None), "-");
    }
}
