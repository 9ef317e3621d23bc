use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::Result;

/// Current instant truncated to microseconds.
///
/// Every backend persists timestamps at microsecond precision, so values
/// handed back to callers are truncated up front to round-trip exactly.
pub fn now_utc() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

/// Formats a timestamp as fixed-width RFC 3339 (`2024-01-02T03:04:05.123456Z`).
///
/// Fixed width makes lexical order equal chronological order, which the
/// SQL backend relies on for `ORDER BY created_at`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_fixed_width_and_sortable() {
        let a = parse_timestamp("2024-01-02T03:04:05Z").unwrap();
        let b = parse_timestamp("2024-01-02T03:04:05.5Z").unwrap();
        let fa = format_timestamp(&a);
        let fb = format_timestamp(&b);
        assert_eq!(fa, "2024-01-02T03:04:05.000000Z");
        assert_eq!(fa.len(), fb.len());
        assert!(fa < fb);
    }

    #[test]
    fn test_now_round_trips() {
        let now = now_utc();
        let back = parse_timestamp(&format_timestamp(&now)).unwrap();
        assert_eq!(now, back);
    }
}
