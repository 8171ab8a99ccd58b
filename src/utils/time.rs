//! Timestamp utilities: parsing CLI overrides, RFC3339 storage round-trips,
//! duration formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a timestamp column value written with [`to_store`].
pub fn from_store(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Format a timestamp for storage (RFC3339, UTC).
pub fn to_store(t: DateTime<Utc>) -> String {
    t.to_rfc3339()
}

/// Parse a user-supplied `--at` override. Accepts RFC3339
/// (`2025-06-02T07:30:00Z`) or the shorter `YYYY-MM-DD HH:MM`, which is
/// taken as UTC.
pub fn parse_at(s: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Format a minute count as `HH:MM` for list views.
pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_at_accepts_both_forms() {
        let a = parse_at("2025-06-02T07:30:00Z").unwrap();
        let b = parse_at("2025-06-02 07:30").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_at_rejects_garbage() {
        assert!(parse_at("yesterday-ish").is_err());
    }

    #[test]
    fn store_round_trip() {
        let now = Utc::now();
        let back = from_store(&to_store(now)).unwrap();
        assert_eq!(now, back);
    }

    #[test]
    fn format_minutes_handles_sign() {
        assert_eq!(format_minutes(480), "08:00");
        assert_eq!(format_minutes(-95), "-01:35");
    }
}
