//! Date normalization at the load boundary
//!
//! Ledger files written by older tools mix plain dates, timestamps and
//! day-first dates. Everything past this module sees `NaiveDate` only.

use chrono::{NaiveDate, NaiveDateTime};

/// Format used when writing dates back to the ledger
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parse a date written in any of the accepted formats
///
/// Timestamps are truncated to their calendar date. Ambiguous slash dates
/// are read day-first.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Render a date the way the ledger stores it
pub fn format_stored_date(date: NaiveDate) -> String {
    date.format(STORED_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(normalize_date("2024-01-05"), Some(date(2024, 1, 5)));
        assert_eq!(normalize_date("  2024-01-05 "), Some(date(2024, 1, 5)));
    }

    #[test]
    fn test_timestamps_truncate_to_date() {
        assert_eq!(normalize_date("2024-01-05 00:00:00"), Some(date(2024, 1, 5)));
        assert_eq!(
            normalize_date("2024-01-05 13:45:10.123456"),
            Some(date(2024, 1, 5))
        );
        assert_eq!(normalize_date("2024-01-05T08:00:00"), Some(date(2024, 1, 5)));
        assert_eq!(
            normalize_date("2024-01-05T08:00:00-03:00"),
            Some(date(2024, 1, 5))
        );
    }

    #[test]
    fn test_day_first_formats() {
        assert_eq!(normalize_date("05/01/2024"), Some(date(2024, 1, 5)));
        assert_eq!(normalize_date("31/12/2023"), Some(date(2023, 12, 31)));
        assert_eq!(normalize_date("05-01-2024"), Some(date(2024, 1, 5)));
        assert_eq!(normalize_date("2024/01/05"), Some(date(2024, 1, 5)));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("yesterday"), None);
        assert_eq!(normalize_date("2024-13-40"), None);
    }

    #[test]
    fn test_format_stored_date() {
        assert_eq!(format_stored_date(date(2024, 2, 1)), "2024-02-01");
    }
}
