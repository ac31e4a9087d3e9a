// src/utils/mod.rs

//! Shared date and time helpers.

pub mod http;

use chrono::{Local, NaiveDate, NaiveTime};

/// Cache key date format (`dd-MM-yyyy`).
pub const KEY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Long-form Gregorian format used by the Hijri calendar source,
/// e.g. "Tuesday, May 14, 2025".
pub const LONG_DATE_FORMAT: &str = "%A, %B %d, %Y";

/// Today's cache key in local time.
pub fn today_key() -> String {
    Local::now().format(KEY_DATE_FORMAT).to_string()
}

/// Parse a long-form Gregorian date and re-key it to `dd-MM-yyyy`.
pub fn rekey_long_date(text: &str) -> Option<String> {
    NaiveDate::parse_from_str(text.trim(), LONG_DATE_FORMAT)
        .ok()
        .map(|d| d.format(KEY_DATE_FORMAT).to_string())
}

/// Parse `HH:mm` time-of-day text. Sentinels and garbage yield None.
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M").ok()
}

/// Render a stored `HH:mm` value as 12-hour text, e.g. "13:15" -> "1:15 PM".
///
/// Unparseable input (including the sentinel) is returned untouched.
pub fn format_time_12h(raw: &str) -> String {
    match parse_time_of_day(raw) {
        Some(t) => t.format("%-I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rekey_long_date() {
        assert_eq!(
            rekey_long_date("Wednesday, May 14, 2025"),
            Some("14-05-2025".to_string())
        );
        assert_eq!(
            rekey_long_date("  Friday, June 6, 2025  "),
            Some("06-06-2025".to_string())
        );
    }

    #[test]
    fn test_rekey_long_date_rejects_garbage() {
        assert_eq!(rekey_long_date("14-05-2025"), None);
        assert_eq!(rekey_long_date("Someday, Smarch 99, 2025"), None);
        // Weekday must agree with the date
        assert_eq!(rekey_long_date("Tuesday, May 14, 2025"), None);
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(
            parse_time_of_day("13:15"),
            NaiveTime::from_hms_opt(13, 15, 0)
        );
        assert_eq!(parse_time_of_day(" 05:50 "), NaiveTime::from_hms_opt(5, 50, 0));
        assert_eq!(parse_time_of_day("--:--"), None);
        assert_eq!(parse_time_of_day(""), None);
    }

    #[test]
    fn test_format_time_12h() {
        assert_eq!(format_time_12h("13:15"), "1:15 PM");
        assert_eq!(format_time_12h("05:50"), "5:50 AM");
        assert_eq!(format_time_12h("00:10"), "12:10 AM");
        assert_eq!(format_time_12h("--:--"), "--:--");
    }
}
