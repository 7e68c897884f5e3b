//! Display formatting for the `published` timestamp.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::config::{RenderOptions, display};

/// Format a `published` value as a short date in the configured zone.
///
/// Accepts RFC 3339 timestamps, offset-less date-times (read as wall-clock
/// time in the display zone) and plain `YYYY-MM-DD` dates (read as UTC
/// midnight). Anything else, or an unusable format pattern, yields
/// `Invalid Date`.
#[must_use]
pub fn format_date(published: &str, options: &RenderOptions) -> String {
    let Some(instant) = parse_published(published.trim(), options.utc_offset) else {
        return display::INVALID_DATE.to_string();
    };

    let mut out = String::new();
    let written = match options.utc_offset {
        Some(offset) => {
            write!(out, "{}", instant.with_timezone(&offset).format(&options.date_format))
        }
        None => write!(out, "{}", instant.with_timezone(&Local).format(&options.date_format)),
    };

    match written {
        Ok(()) => out,
        Err(_) => {
            tracing::warn!(pattern = %options.date_format, "Unusable date format pattern");
            display::INVALID_DATE.to_string()
        }
    }
}

fn parse_published(value: &str, offset: Option<FixedOffset>) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return match offset {
                Some(offset) => {
                    offset.from_local_datetime(&naive).single().map(|dt| dt.with_timezone(&Utc))
                }
                None => Local.from_local_datetime(&naive).earliest().map(|dt| dt.with_timezone(&Utc)),
            };
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hours: i32) -> RenderOptions {
        RenderOptions { utc_offset: FixedOffset::east_opt(hours * 3600), ..RenderOptions::default() }
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(format_date("2024-10-01T17:59:59+00:00", &at(0)), "10/1/2024");
    }

    #[test]
    fn test_offset_shifts_calendar_day() {
        assert_eq!(format_date("2024-10-01T17:59:59+00:00", &at(9)), "10/2/2024");
        assert_eq!(format_date("2024-10-01T01:00:00Z", &at(-5)), "9/30/2024");
    }

    #[test]
    fn test_naive_datetime_is_wall_clock() {
        assert_eq!(format_date("2024-10-01T23:30:00", &at(-5)), "10/1/2024");
    }

    #[test]
    fn test_date_only_is_utc_midnight() {
        assert_eq!(format_date("2024-03-05", &at(0)), "3/5/2024");
        assert_eq!(format_date("2024-03-05", &at(-1)), "3/4/2024");
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(format_date("", &at(0)), "Invalid Date");
        assert_eq!(format_date("yesterday", &at(0)), "Invalid Date");
    }

    #[test]
    fn test_custom_pattern() {
        let options = RenderOptions { date_format: "%Y-%m-%d".to_string(), ..at(0) };
        assert_eq!(format_date("2024-10-01T17:59:59+00:00", &options), "2024-10-01");
    }

    #[test]
    fn test_bad_pattern_does_not_panic() {
        let options = RenderOptions { date_format: "%Q".to_string(), ..at(0) };
        assert_eq!(format_date("2024-10-01T17:59:59+00:00", &options), "Invalid Date");
    }
}
