//! Shared pagination utilities for GraphQL resolvers

use chrono::{DateTime, Utc};

/// Maximum items per page for the posts listing
pub const MAX_TAKE: i32 = 50;

/// Clamp a requested page size to the valid range
#[inline]
pub fn clamp_take(take: i32) -> i64 {
    take.clamp(1, MAX_TAKE) as i64
}

/// Parse an opaque pagination cursor
///
/// Cursors are the RFC 3339 rendering of a previously returned post's
/// `createdAt`; anything else is rejected.
pub fn parse_cursor(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(20, 20)]
    #[case(50, 50)]
    #[case(51, 50)]
    #[case(1000, 50)]
    #[case(0, 1)]
    #[case(-5, 1)]
    fn test_clamp_take(#[case] take: i32, #[case] expected: i64) {
        assert_eq!(clamp_take(take), expected);
    }

    #[test]
    fn test_parse_cursor_round_trip() {
        let now = Utc::now();
        let parsed = parse_cursor(&now.to_rfc3339()).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_parse_cursor_with_offset() {
        let parsed = parse_cursor("2026-03-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-03-01T10:00:00+00:00");
    }

    #[test]
    fn test_parse_cursor_invalid() {
        assert!(parse_cursor("").is_none());
        assert!(parse_cursor("yesterday").is_none());
        assert!(parse_cursor("1234567890").is_none());
    }
}
