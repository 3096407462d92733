//! Calendar-relative time ranges used by natural-language filters.
//!
//! Boundaries are computed against local midnights of the caller's clock and
//! stored in UTC. Weeks start on Sunday.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveTime, Offset, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// TIME RANGE
// =============================================================================

/// Half-open interval `[from, to)` over note creation time.
///
/// A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Closed-open range with both bounds.
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Range with only a lower bound.
    pub fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// Check whether `ts` falls inside the range.
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| *ts >= from) && self.to.map_or(true, |to| *ts < to)
    }
}

// =============================================================================
// CALENDAR RANGES
// =============================================================================

/// Named calendar periods recognised in free-text queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarRange {
    /// `[midnight today, midnight tomorrow)`
    Today,
    /// `[midnight yesterday, midnight today)`
    Yesterday,
    /// `[start of this week, open)`
    ThisWeek,
    /// `[start of last week, start of this week)`
    LastWeek,
}

impl CalendarRange {
    /// Resolve the named period against `now`, in `now`'s time zone.
    pub fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TimeRange {
        match self {
            Self::Today => TimeRange::between(midnight(now, 0), midnight(now, 1)),
            Self::Yesterday => TimeRange::between(midnight(now, -1), midnight(now, 0)),
            Self::ThisWeek => TimeRange::since(start_of_week(now, 0)),
            Self::LastWeek => TimeRange::between(start_of_week(now, 1), start_of_week(now, 0)),
        }
    }
}

/// Local midnight `days` days away from `now`'s date, as UTC.
pub fn midnight<Tz: TimeZone>(now: &DateTime<Tz>, days: i64) -> DateTime<Utc> {
    let naive = (now.date_naive() + Duration::days(days)).and_time(NaiveTime::MIN);
    match now.timezone().from_local_datetime(&naive) {
        LocalResult::Single(t) => t.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Midnight skipped by a DST transition; fall back to the current offset.
            let offset = now.offset().fix().local_minus_utc();
            (naive - Duration::seconds(i64::from(offset))).and_utc()
        }
    }
}

/// Midnight of the Sunday starting the calendar week `weeks_back` weeks ago.
pub fn start_of_week<Tz: TimeZone>(now: &DateTime<Tz>, weeks_back: i64) -> DateTime<Utc> {
    let since_sunday = i64::from(now.weekday().num_days_from_sunday());
    midnight(now, -(since_sunday + 7 * weeks_back))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    // 2026-10-14 is a Wednesday.
    fn wednesday_afternoon() -> DateTime<Utc> {
        utc(2026, 10, 14, 15, 30)
    }

    #[test]
    fn test_time_range_is_half_open() {
        let range = TimeRange::between(utc(2026, 10, 14, 0, 0), utc(2026, 10, 15, 0, 0));
        assert!(range.contains(&utc(2026, 10, 14, 0, 0)));
        assert!(range.contains(&utc(2026, 10, 14, 23, 59)));
        assert!(!range.contains(&utc(2026, 10, 15, 0, 0)));
        assert!(!range.contains(&utc(2026, 10, 13, 23, 59)));
    }

    #[test]
    fn test_open_ended_range() {
        let range = TimeRange::since(utc(2026, 10, 11, 0, 0));
        assert!(range.contains(&utc(2030, 1, 1, 0, 0)));
        assert!(!range.contains(&utc(2026, 10, 10, 23, 59)));
        assert!(TimeRange::default().contains(&utc(1970, 1, 1, 0, 0)));
    }

    #[test]
    fn test_today_and_yesterday() {
        let now = wednesday_afternoon();
        assert_eq!(
            CalendarRange::Today.resolve(&now),
            TimeRange::between(utc(2026, 10, 14, 0, 0), utc(2026, 10, 15, 0, 0))
        );
        assert_eq!(
            CalendarRange::Yesterday.resolve(&now),
            TimeRange::between(utc(2026, 10, 13, 0, 0), utc(2026, 10, 14, 0, 0))
        );
    }

    #[test]
    fn test_this_week_starts_on_sunday_and_is_open() {
        let range = CalendarRange::ThisWeek.resolve(&wednesday_afternoon());
        assert_eq!(range.from, Some(utc(2026, 10, 11, 0, 0)));
        assert_eq!(range.to, None);
    }

    #[test]
    fn test_last_week_is_previous_calendar_week() {
        let range = CalendarRange::LastWeek.resolve(&wednesday_afternoon());
        assert_eq!(
            range,
            TimeRange::between(utc(2026, 10, 4, 0, 0), utc(2026, 10, 11, 0, 0))
        );
    }

    #[test]
    fn test_week_start_on_a_sunday_is_that_day() {
        let sunday = utc(2026, 10, 18, 9, 0);
        assert_eq!(start_of_week(&sunday, 0), utc(2026, 10, 18, 0, 0));
        assert_eq!(start_of_week(&sunday, 1), utc(2026, 10, 11, 0, 0));
    }

    #[test]
    fn test_midnight_uses_callers_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        // 00:30 local on the 14th is still the 13th in UTC.
        let now = tz.with_ymd_and_hms(2026, 10, 14, 0, 30, 0).unwrap();
        assert_eq!(midnight(&now, 0), utc(2026, 10, 13, 22, 0));
        assert_eq!(
            CalendarRange::Today.resolve(&now),
            TimeRange::between(utc(2026, 10, 13, 22, 0), utc(2026, 10, 14, 22, 0))
        );
    }

    #[test]
    fn test_month_boundaries() {
        let now = utc(2026, 11, 1, 12, 0); // Sunday
        assert_eq!(midnight(&now, -1), utc(2026, 10, 31, 0, 0));
        assert_eq!(start_of_week(&now, 1), utc(2026, 10, 25, 0, 0));
    }
}
