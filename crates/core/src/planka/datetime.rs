//! ISO-8601 parsing for due dates

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid datetime '{0}'. Use ISO-8601 like 2025-01-31 or 2025-01-31T10:30:00Z.")]
pub struct DateTimeError(pub String);

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a user-supplied datetime into UTC
///
/// Accepts a bare date (midnight UTC), a date and time with an optional `Z` or
/// `±HH:MM` offset, and a space in place of the `T` separator. Values without an
/// offset are taken as UTC.
pub fn parse_iso_datetime(value: &str) -> Result<DateTime<Utc>, DateTimeError> {
    let candidate = value.trim();
    if candidate.is_empty() {
        return Err(DateTimeError(value.to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(candidate) {
        return Ok(parsed.with_timezone(&Utc));
    }

    // RFC 3339 requires seconds and a `T`; retry with a normalized separator
    let with_t = candidate.replacen(' ', "T", 1);
    for format in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"] {
        if let Ok(parsed) = DateTime::parse_from_str(&with_t, format) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }
    if let Some(stripped) = with_t.strip_suffix('Z') {
        if let Some(naive) = parse_naive(stripped) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(naive) = parse_naive(candidate) {
        return Ok(naive.and_utc());
    }

    NaiveDate::parse_from_str(candidate, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DateTimeError(value.to_string()))
}

fn parse_naive(candidate: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(candidate, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse_date_only_is_midnight_utc() {
        assert_eq!(
            parse_iso_datetime("2025-01-31").unwrap(),
            utc(2025, 1, 31, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_zulu_suffix() {
        assert_eq!(
            parse_iso_datetime("2025-01-31T10:30:00Z").unwrap(),
            utc(2025, 1, 31, 10, 30, 0)
        );
    }

    #[test]
    fn test_parse_offset_is_converted_to_utc() {
        assert_eq!(
            parse_iso_datetime("2025-01-31T10:30:00+02:00").unwrap(),
            utc(2025, 1, 31, 8, 30, 0)
        );
    }

    #[test]
    fn test_parse_naive_datetime_is_utc() {
        assert_eq!(
            parse_iso_datetime("2025-01-31T10:30:00").unwrap(),
            utc(2025, 1, 31, 10, 30, 0)
        );
        assert_eq!(
            parse_iso_datetime("2025-01-31 10:30").unwrap(),
            utc(2025, 1, 31, 10, 30, 0)
        );
    }

    #[test]
    fn test_parse_minutes_with_zulu_and_offset() {
        assert_eq!(
            parse_iso_datetime("2025-01-31T10:30Z").unwrap(),
            utc(2025, 1, 31, 10, 30, 0)
        );
        assert_eq!(
            parse_iso_datetime("2025-01-31T10:30-01:00").unwrap(),
            utc(2025, 1, 31, 11, 30, 0)
        );
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let parsed = parse_iso_datetime("2025-01-31T10:30:00.250Z").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_iso_datetime("next tuesday").unwrap_err();
        assert!(err.to_string().contains("Use ISO-8601"));

        assert!(parse_iso_datetime("2025-13-01").is_err());
        assert!(parse_iso_datetime("").is_err());
        assert!(parse_iso_datetime("31/01/2025").is_err());
    }
}
