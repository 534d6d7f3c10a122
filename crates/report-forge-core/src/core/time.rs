// crates/report-forge-core/src/core/time.rs
// ============================================================================
// Module: Report Forge Time Helpers
// Description: Stamp formatting and date parsing for report documents.
// Purpose: Provide deterministic time handling; the core never reads
//          wall-clock time directly.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Report documents carry timestamps as `YYYY-MM-DD HH:mm:ss` strings in UTC
//! and date filters as loosely ISO-shaped strings. The helpers here parse and
//! format those wire forms. Hosts supply the current time through the
//! [`Clock`](crate::interfaces::Clock) interface; nothing in this module
//! consults the system clock.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Wire format for document timestamps (`YYYY-MM-DD HH:mm:ss`).
const STAMP_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Wire format for date-only values (`YYYY-MM-DD`).
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

// ============================================================================
// SECTION: Stamp Formatting
// ============================================================================

/// Formats a timestamp as the UTC-normalized document stamp.
#[must_use]
pub fn format_stamp(at: OffsetDateTime) -> String {
    let utc = at.to_offset(time::UtcOffset::UTC);
    utc.format(STAMP_FORMAT).unwrap_or_default()
}

// ============================================================================
// SECTION: Date Parsing
// ============================================================================

/// Parses a date filter value into a calendar date.
///
/// Accepts RFC3339 date-times, `YYYY-MM-DD HH:mm:ss` stamps, and bare
/// `YYYY-MM-DD` dates. Range comparisons operate at day granularity: the
/// `from` side is implicitly floored to 00:00:00 and the `to` side ceiled to
/// 23:59:59, so comparing the calendar dates is sufficient.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(parsed.date());
    }
    if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, STAMP_FORMAT) {
        return Some(parsed.date());
    }
    Date::parse(trimmed, DATE_FORMAT).ok()
}

/// Checks that a day-granularity range is ordered (`from <= to`).
#[must_use]
pub fn day_range_is_ordered(from: Date, to: Date) -> bool {
    from <= to
}

// ============================================================================
// SECTION: Schedule Fields
// ============================================================================

/// Checks a planning start hour: `HH:MM` exactly on the hour boundary.
#[must_use]
pub fn is_full_hour(raw: &str) -> bool {
    let Some((hour, minute)) = raw.split_once(':') else {
        return false;
    };
    if hour.len() != 2 || minute != "00" {
        return false;
    }
    hour.parse::<u8>().is_ok_and(|h| h < 24)
}

/// Structurally checks an IANA timezone name.
///
/// The pack ships no tz database crate, so this accepts the fixed UTC aliases
/// plus `Area/Location` shapes with alphanumeric, `_`, `-`, and `+` segments.
#[must_use]
pub fn is_iana_timezone(raw: &str) -> bool {
    if matches!(raw, "UTC" | "GMT") {
        return true;
    }
    let mut segments = raw.split('/');
    let mut count = 0usize;
    for segment in &mut segments {
        if segment.is_empty()
            || !segment.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+'))
        {
            return false;
        }
        count += 1;
    }
    count >= 2
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::format_stamp;
    use super::is_full_hour;
    use super::is_iana_timezone;
    use super::parse_date;

    #[test]
    fn formats_utc_normalized_stamp() {
        let stamped = format_stamp(datetime!(2024-03-05 14:30:09 +02:00));
        assert_eq!(stamped, "2024-03-05 12:30:09");
    }

    #[test]
    fn parses_all_supported_date_shapes() {
        assert!(parse_date("2024-03-05").is_some());
        assert!(parse_date("2024-03-05 10:00:00").is_some());
        assert!(parse_date("2024-03-05T10:00:00Z").is_some());
        assert!(parse_date("march 5").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn start_hour_must_sit_on_the_hour() {
        assert!(is_full_hour("09:00"));
        assert!(is_full_hour("23:00"));
        assert!(!is_full_hour("09:30"));
        assert!(!is_full_hour("24:00"));
        assert!(!is_full_hour("9:00"));
        assert!(!is_full_hour("0900"));
    }

    #[test]
    fn timezone_check_is_structural() {
        assert!(is_iana_timezone("UTC"));
        assert!(is_iana_timezone("Europe/Rome"));
        assert!(is_iana_timezone("America/Argentina/Buenos_Aires"));
        assert!(!is_iana_timezone("Rome"));
        assert!(!is_iana_timezone("Europe//Rome"));
        assert!(!is_iana_timezone("Europe/Ro me"));
    }
}
