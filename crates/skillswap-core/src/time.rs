use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

/// Parse a stored timestamp. Rows written by this crate are RFC 3339; older
/// rows may carry SQLite's `YYYY-MM-DD HH:MM:SS` without a zone, read as UTC.
pub(crate) fn parse_timestamp(raw: &str, context: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on {}: {}", raw, context, e);
            DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_both_formats() {
        let a = parse_timestamp("2026-03-01T10:20:30.123456Z", "test");
        assert_eq!((a.year(), a.hour(), a.nanosecond()), (2026, 10, 123_456_000));

        let b = parse_timestamp("2024-01-02 03:04:05", "test");
        assert_eq!((b.day(), b.minute(), b.second()), (2, 4, 5));
    }

    #[test]
    fn garbage_falls_back_to_epoch() {
        assert_eq!(parse_timestamp("yesterday", "test"), DateTime::<Utc>::default());
    }
}
