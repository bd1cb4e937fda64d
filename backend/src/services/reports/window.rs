//! Time-window resolution for report queries
//!
//! Turns a period token ("7d", "30d", "90d", "365d") or an explicit date
//! range into a concrete `[start, end)` pair. Bad input never fails a
//! report: malformed dates and unknown tokens degrade to a 30-day window.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Window applied when input is absent or unparseable
pub const FALLBACK_WINDOW_DAYS: i64 = 30;

/// A resolved report window
///
/// `end == None` means "up to now"; aggregation queries only add an upper
/// bound when an end instant is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl ReportWindow {
    /// Window covering the last `days` days up to `now`
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(days),
            end: None,
        }
    }

    /// Resolve a window from user input
    ///
    /// Precedence: explicit date range, then period token, then the
    /// engine-specific `default_days`. Any parse failure in an explicit
    /// range falls back to the 30-day window.
    pub fn resolve(
        period: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        default_days: i64,
        now: DateTime<Utc>,
    ) -> Self {
        if start_date.is_some() || end_date.is_some() {
            match Self::resolve_explicit(start_date, end_date, default_days, now) {
                Some(window) => return window,
                None => return Self::last_days(FALLBACK_WINDOW_DAYS, now),
            }
        }

        match period {
            Some(token) => Self::last_days(period_days(token), now),
            None => Self::last_days(default_days, now),
        }
    }

    fn resolve_explicit(
        start_date: Option<&str>,
        end_date: Option<&str>,
        default_days: i64,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        // An end-only range still starts at the engine default, the
        // same as when no range is given at all
        let start = match start_date {
            Some(raw) => parse_instant(raw)?,
            None => now - Duration::days(default_days),
        };

        let end = match end_date {
            Some(raw) => Some(end_of_day_if_midnight(parse_instant(raw)?)),
            None => None,
        };

        Some(Self { start, end })
    }

    /// Whole days covered by the window, never less than 1
    pub fn duration_days(&self, now: DateTime<Utc>) -> i64 {
        let end = self.end.unwrap_or(now);
        (end - self.start).num_days().max(1)
    }

    /// Whole ISO weeks covered by the window, never less than 1
    pub fn duration_weeks(&self, now: DateTime<Utc>) -> i64 {
        (self.duration_days(now) / 7).max(1)
    }
}

/// Map a period token to its day count; unknown tokens get the fallback
fn period_days(token: &str) -> i64 {
    match token {
        "7d" => 7,
        "30d" => 30,
        "90d" => 90,
        "365d" => 365,
        _ => FALLBACK_WINDOW_DAYS,
    }
}

/// Parse an RFC 3339 instant, a naive datetime, or a bare date (midnight)
pub(crate) fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    None
}

/// Date-only end inputs should cover the whole final day
fn end_of_day_if_midnight(instant: DateTime<Utc>) -> DateTime<Utc> {
    if instant.time() == NaiveTime::MIN {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Utc.from_utc_datetime(&instant.date_naive().and_time(end_of_day))
    } else {
        instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_period_tokens() {
        let window = ReportWindow::resolve(Some("7d"), None, None, 90, now());
        assert_eq!(window.start, now() - Duration::days(7));
        assert_eq!(window.end, None);

        let window = ReportWindow::resolve(Some("365d"), None, None, 90, now());
        assert_eq!(window.start, now() - Duration::days(365));
    }

    #[test]
    fn test_unknown_token_falls_back_to_30_days() {
        let window = ReportWindow::resolve(Some("14d"), None, None, 90, now());
        assert_eq!(window.start, now() - Duration::days(30));
    }

    #[test]
    fn test_engine_default_when_nothing_given() {
        let window = ReportWindow::resolve(None, None, None, 90, now());
        assert_eq!(window.start, now() - Duration::days(90));
        assert_eq!(window.end, None);
    }

    #[test]
    fn test_explicit_range_takes_precedence_over_token() {
        let window =
            ReportWindow::resolve(Some("7d"), Some("2024-01-01"), Some("2024-03-31"), 90, now());
        assert_eq!(window.start.date_naive().to_string(), "2024-01-01");
        // Date-only end covers the whole final day
        let end = window.end.unwrap();
        assert_eq!(end.date_naive().to_string(), "2024-03-31");
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
    }

    #[test]
    fn test_explicit_end_with_time_is_kept() {
        let window =
            ReportWindow::resolve(None, Some("2024-01-01"), Some("2024-03-31T08:30:00"), 90, now());
        let end = window.end.unwrap();
        assert_eq!((end.hour(), end.minute()), (8, 30));
    }

    #[test]
    fn test_end_only_range_keeps_engine_default_start() {
        let window = ReportWindow::resolve(None, None, Some("2024-06-10"), 90, now());
        assert_eq!(window.start, now() - Duration::days(90));
        let end = window.end.unwrap();
        assert_eq!(end.date_naive().to_string(), "2024-06-10");
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
    }

    #[test]
    fn test_malformed_date_falls_back_silently() {
        let window = ReportWindow::resolve(None, Some("not-a-date"), None, 90, now());
        assert_eq!(window.start, now() - Duration::days(30));
        assert_eq!(window.end, None);
    }

    #[test]
    fn test_duration_days_floors_at_one() {
        let window = ReportWindow {
            start: now(),
            end: Some(now()),
        };
        assert_eq!(window.duration_days(now()), 1);
        assert_eq!(window.duration_weeks(now()), 1);
    }

    #[test]
    fn test_duration_weeks() {
        let window = ReportWindow::last_days(84, now());
        assert_eq!(window.duration_weeks(now()), 12);
        let window = ReportWindow::last_days(90, now());
        assert_eq!(window.duration_weeks(now()), 12);
    }
}
