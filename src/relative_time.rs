//! Human phrases for timestamps relative to now ("3 days ago", "in 5 minutes").
//!
//! Counts are floored, never rounded: 3599 seconds is "59 minutes ago".
//! Months are 30 days and years 365 days.

use chrono::{DateTime, Utc};

/// Differences up to this many milliseconds either way read as "just now".
const JUST_NOW_WINDOW_MS: i64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    /// Largest first; the first unit with a whole count wins.
    const DESCENDING: [Unit; 7] = [
        Unit::Year,
        Unit::Month,
        Unit::Week,
        Unit::Day,
        Unit::Hour,
        Unit::Minute,
        Unit::Second,
    ];

    fn seconds(self) -> i64 {
        match self {
            Unit::Year => 365 * 86_400,
            Unit::Month => 30 * 86_400,
            Unit::Week => 7 * 86_400,
            Unit::Day => 86_400,
            Unit::Hour => 3_600,
            Unit::Minute => 60,
            Unit::Second => 1,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Week => "week",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
        }
    }

    /// Phrase used instead of "1 <unit>" for calendar-like units.
    fn idiom(self, past: bool) -> Option<&'static str> {
        let phrase = match (self, past) {
            (Unit::Year, true) => "last year",
            (Unit::Year, false) => "next year",
            (Unit::Month, true) => "last month",
            (Unit::Month, false) => "next month",
            (Unit::Week, true) => "last week",
            (Unit::Week, false) => "next week",
            (Unit::Day, true) => "yesterday",
            (Unit::Day, false) => "tomorrow",
            _ => return None,
        };
        Some(phrase)
    }
}

/// Describe `timestamp` relative to the current time.
pub fn format_relative(timestamp: DateTime<Utc>) -> String {
    format_relative_at(timestamp, Utc::now())
}

/// Describe `timestamp` relative to `now`.
///
/// Pure: the same pair always yields the same phrase.
pub fn format_relative_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = timestamp.signed_duration_since(now).num_milliseconds();
    let past = diff_ms < 0;
    let abs_ms = diff_ms.unsigned_abs();

    if abs_ms <= JUST_NOW_WINDOW_MS as u64 {
        return "just now".to_string();
    }

    for unit in Unit::DESCENDING {
        let amount = abs_ms / (unit.seconds() as u64 * 1_000);
        if amount == 0 {
            continue;
        }

        if amount == 1 {
            if let Some(idiom) = unit.idiom(past) {
                return idiom.to_string();
            }
        }

        let plural = if amount == 1 { "" } else { "s" };
        return if past {
            format!("{} {}{} ago", amount, unit.name(), plural)
        } else {
            format!("in {} {}{}", amount, unit.name(), plural)
        };
    }

    "just now".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    }

    fn ago(seconds: i64) -> String {
        format_relative_at(now() - Duration::seconds(seconds), now())
    }

    fn ahead(seconds: i64) -> String {
        format_relative_at(now() + Duration::seconds(seconds), now())
    }

    #[test]
    fn test_just_now() {
        assert_eq!(ago(0), "just now");
        assert_eq!(ago(1), "just now");
        assert_eq!(ahead(1), "just now");
        assert_eq!(
            format_relative_at(now() - Duration::milliseconds(400), now()),
            "just now"
        );
    }

    #[test]
    fn test_past_single_units() {
        assert_eq!(ago(60), "1 minute ago");
        assert_eq!(ago(3_600), "1 hour ago");
        assert_eq!(ago(86_400), "yesterday");
        assert_eq!(ago(7 * 86_400), "last week");
        assert_eq!(ago(30 * 86_400), "last month");
        assert_eq!(ago(365 * 86_400), "last year");
    }

    #[test]
    fn test_future_single_units() {
        assert_eq!(ahead(60), "in 1 minute");
        assert_eq!(ahead(3_600), "in 1 hour");
        assert_eq!(ahead(86_400), "tomorrow");
        assert_eq!(ahead(7 * 86_400), "next week");
        assert_eq!(ahead(30 * 86_400), "next month");
        assert_eq!(ahead(365 * 86_400), "next year");
    }

    #[test]
    fn test_floor_at_boundaries() {
        assert_eq!(ago(59), "59 seconds ago");
        assert_eq!(ago(3_599), "59 minutes ago");
        assert_eq!(ago(86_399), "23 hours ago");
        assert_eq!(ago(6 * 86_400 + 86_399), "6 days ago");
    }

    #[test]
    fn test_plural_counts() {
        assert_eq!(ago(2), "2 seconds ago");
        assert_eq!(ago(3 * 86_400), "3 days ago");
        assert_eq!(ahead(5 * 60), "in 5 minutes");
        assert_eq!(ago(2 * 7 * 86_400), "2 weeks ago");
        assert_eq!(ago(2 * 365 * 86_400), "2 years ago");
    }

    #[test]
    fn test_month_wins_over_week_after_thirty_days() {
        // 29 days is still weeks, 60 days is months.
        assert_eq!(ago(29 * 86_400), "4 weeks ago");
        assert_eq!(ago(60 * 86_400), "2 months ago");
    }

    #[test]
    fn test_format_relative_uses_current_clock() {
        assert_eq!(format_relative(Utc::now()), "just now");
        assert_eq!(format_relative(Utc::now() - Duration::days(1)), "yesterday");
    }

    #[test]
    fn test_stable_for_fixed_pair() {
        let ts = now() - Duration::seconds(12_345);
        assert_eq!(format_relative_at(ts, now()), format_relative_at(ts, now()));
    }
}
