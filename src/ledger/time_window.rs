//! Inclusive UTC time windows used by range queries and summaries.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};

/// Closed interval `[start, end]` of instants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(TrackerError::Validation(
                "window end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// From UTC midnight of `now` up to `now` itself.
    pub fn today(now: DateTime<Utc>) -> Self {
        Self {
            start: start_of_day(now.date_naive()),
            end: now,
        }
    }

    /// The whole UTC calendar day.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: start_of_day(date),
            end: end_of_day(date),
        }
    }

    /// Sunday 00:00 through Saturday 23:59:59.999 of the week containing `now`.
    pub fn week_of(now: DateTime<Utc>) -> Self {
        let date = now.date_naive();
        let offset = date.weekday().num_days_from_sunday() as i64;
        let sunday = date - Duration::days(offset);
        Self {
            start: start_of_day(sunday),
            end: end_of_day(sunday + Duration::days(6)),
        }
    }

    /// First to last day of the calendar month containing `now`.
    pub fn month_of(now: DateTime<Utc>) -> Self {
        let date = now.date_naive();
        let first = first_of_month(date);
        Self {
            start: start_of_day(first),
            end: end_of_day(last_of_month(date)),
        }
    }
}

/// Last calendar day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_first
        .map(|next| next - Duration::days(1))
        .unwrap_or(date)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let window = DateWindow::new(at(2025, 5, 1, 0, 0), at(2025, 5, 2, 0, 0)).unwrap();
        assert!(window.contains(at(2025, 5, 1, 0, 0)));
        assert!(window.contains(at(2025, 5, 2, 0, 0)));
        assert!(!window.contains(at(2025, 5, 2, 0, 1)));
    }

    #[test]
    fn rejects_inverted_window() {
        assert!(DateWindow::new(at(2025, 5, 2, 0, 0), at(2025, 5, 1, 0, 0)).is_err());
    }

    #[test]
    fn today_runs_from_midnight_to_now() {
        let now = at(2025, 5, 11, 15, 45);
        let window = DateWindow::today(now);
        assert_eq!(window.start, at(2025, 5, 11, 0, 0));
        assert_eq!(window.end, now);
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2025-05-14 is a Wednesday.
        let window = DateWindow::week_of(at(2025, 5, 14, 12, 0));
        assert_eq!(window.start, at(2025, 5, 11, 0, 0));
        assert!(window.contains(at(2025, 5, 17, 23, 59)));
        assert!(!window.contains(at(2025, 5, 18, 0, 0)));
    }

    #[test]
    fn month_covers_whole_calendar_month() {
        let window = DateWindow::month_of(at(2024, 2, 10, 8, 0));
        assert_eq!(window.start, at(2024, 2, 1, 0, 0));
        assert!(window.contains(at(2024, 2, 29, 23, 59)));
        assert!(!window.contains(at(2024, 3, 1, 0, 0)));
    }

    #[test]
    fn last_of_month_handles_december() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 3).unwrap();
        assert_eq!(
            last_of_month(date),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
    }
}
