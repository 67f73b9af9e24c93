//! Date parsing and calendar math for the booking pipeline.
//!
//! Spreadsheet exports carry Dutch-locale `DD-MM-YYYY` dates, optionally with
//! a trailing time component. Day/month/year are extracted positionally so a
//! date like `05-06-2026` can never be read month-first.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Parse a locale-formatted date cell.
///
/// Tries the strict `D{1,2}-M{1,2}-YYYY` pattern first (anything after the
/// first space, e.g. a time component, is discarded), then falls back to
/// generic ISO forms. Returns `None` for empty or invalid input, never
/// panics.
pub fn parse_local_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let date_part = s.split_whitespace().next()?;
    if let Some(date) = parse_day_month_year(date_part) {
        return Some(date);
    }

    // Generic fallback for cells that already hold ISO dates or datetimes.
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    None
}

fn parse_day_month_year(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let (dd, mm, yyyy) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    if !(1..=2).contains(&dd.len()) || !(1..=2).contains(&mm.len()) || yyyy.len() != 4 {
        return None;
    }
    let day: u32 = dd.parse().ok()?;
    let month: u32 = mm.parse().ok()?;
    let year: i32 = yyyy.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date back into the `DD-MM-YYYY` form used in tooltips and
/// exports. Round-trips with [`parse_local_date`].
pub fn format_date_local(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Whole days from `a` to `b`, clamped to zero when `b` precedes `a`.
pub fn diff_days(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().max(0)
}

pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    }
    .unwrap_or(date)
}

/// Monday on or before the given date.
pub fn start_of_week_monday(date: NaiveDate) -> NaiveDate {
    add_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// A half-open range of calendar days `[start, end_exclusive)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: NaiveDate,
    pub end_exclusive: NaiveDate,
}

impl DayWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end_exclusive
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let mut current = self.start;
        let end = self.end_exclusive;
        std::iter::from_fn(move || {
            if current < end {
                let d = current;
                current = add_days(current, 1);
                Some(d)
            } else {
                None
            }
        })
    }
}

/// One ISO-8601 week: Monday start, week 1 holds the year's first Thursday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsoWeekSpan {
    pub week: u32,
    pub start: NaiveDate,
    pub end_exclusive: NaiveDate,
}

/// ISO week number of a date (the ISO week-year may differ from the
/// calendar year around January 1st).
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// All ISO weeks belonging to `year`, ascending by week number.
pub fn iso_weeks_of_year(year: i32) -> Vec<IsoWeekSpan> {
    (1..=53)
        .filter_map(|week| {
            NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).map(|start| IsoWeekSpan {
                week,
                start,
                end_exclusive: add_days(start, 7),
            })
        })
        .collect()
}

/// The visible window of a Monday-start month grid: from the Monday on or
/// before the 1st through the Sunday on or after the last day (exclusive
/// end). Leading/trailing cells belong to adjacent months.
pub fn month_grid_window(year: i32, month0: u32) -> Option<DayWindow> {
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    let next_month = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)?
    };
    let last = add_days(next_month, -1);

    let start = start_of_week_monday(first);
    let end_exclusive = add_days(start_of_week_monday(last), 7);
    Some(DayWindow {
        start,
        end_exclusive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_strict_dutch_date() {
        assert_eq!(parse_local_date("10-06-2024"), Some(d(2024, 6, 10)));
        assert_eq!(parse_local_date("1-6-2024"), Some(d(2024, 6, 1)));
    }

    #[test]
    fn parse_discards_time_component() {
        assert_eq!(parse_local_date("10-06-2024 14:00"), Some(d(2024, 6, 10)));
    }

    #[test]
    fn parse_is_day_first_not_month_first() {
        // 05-06 must be June 5th, never May 6th
        assert_eq!(parse_local_date("05-06-2026"), Some(d(2026, 6, 5)));
    }

    #[test]
    fn parse_rejects_invalid_calendar_dates() {
        assert_eq!(parse_local_date("31-02-2024"), None);
        assert_eq!(parse_local_date("00-01-2024"), None);
    }

    #[test]
    fn parse_empty_and_garbage() {
        assert_eq!(parse_local_date(""), None);
        assert_eq!(parse_local_date("   "), None);
        assert_eq!(parse_local_date("niet een datum"), None);
        assert_eq!(parse_local_date("10-06"), None);
    }

    #[test]
    fn parse_generic_iso_fallback() {
        assert_eq!(parse_local_date("2024-06-10"), Some(d(2024, 6, 10)));
    }

    #[test]
    fn format_round_trips() {
        let date = d(2026, 1, 5);
        assert_eq!(format_date_local(date), "05-01-2026");
        assert_eq!(parse_local_date(&format_date_local(date)), Some(date));
    }

    #[test]
    fn diff_days_basic_and_clamped() {
        assert_eq!(diff_days(d(2024, 6, 10), d(2024, 6, 13)), 3);
        assert_eq!(diff_days(d(2024, 6, 13), d(2024, 6, 10)), 0);
        assert_eq!(diff_days(d(2024, 6, 10), d(2024, 6, 10)), 0);
    }

    #[test]
    fn diff_days_across_year_boundary() {
        assert_eq!(diff_days(d(2024, 12, 28), d(2025, 1, 3)), 6);
    }

    #[test]
    fn start_of_week_lands_on_monday() {
        // 2026-06-03 is a Wednesday
        assert_eq!(start_of_week_monday(d(2026, 6, 3)), d(2026, 6, 1));
        // Monday maps to itself
        assert_eq!(start_of_week_monday(d(2026, 6, 1)), d(2026, 6, 1));
        // Sunday belongs to the week started six days earlier
        assert_eq!(start_of_week_monday(d(2026, 6, 7)), d(2026, 6, 1));
    }

    #[test]
    fn iso_week_of_january_first() {
        // 2027-01-01 is a Friday and belongs to 2026-W53
        let date = d(2027, 1, 1);
        assert_eq!(iso_week_number(date), 53);
        assert_eq!(date.iso_week().year(), 2026);
    }

    #[test]
    fn iso_weeks_of_short_and_long_years() {
        // 2026 is a 53-week ISO year, 2025 has 52
        assert_eq!(iso_weeks_of_year(2026).len(), 53);
        assert_eq!(iso_weeks_of_year(2025).len(), 52);
    }

    #[test]
    fn iso_weeks_are_contiguous_mondays() {
        let weeks = iso_weeks_of_year(2026);
        assert_eq!(weeks[0].week, 1);
        for pair in weeks.windows(2) {
            assert_eq!(pair[0].end_exclusive, pair[1].start);
            assert_eq!(pair[0].week + 1, pair[1].week);
        }
        for w in &weeks {
            assert_eq!(w.start.weekday(), Weekday::Mon);
            // The Thursday of each listed week falls in the target year
            assert_eq!(add_days(w.start, 3).year(), 2026);
        }
    }

    #[test]
    fn month_grid_window_covers_whole_month() {
        // June 2026: the 1st is a Monday, the 30th a Tuesday
        let window = month_grid_window(2026, 5).unwrap();
        assert_eq!(window.start, d(2026, 6, 1));
        assert_eq!(window.end_exclusive, d(2026, 7, 6));
        assert!(window.contains(d(2026, 6, 30)));
        assert!(!window.contains(d(2026, 7, 6)));
        assert_eq!(window.days().count(), 35);
    }

    #[test]
    fn month_grid_window_december_wraps_year() {
        let window = month_grid_window(2026, 11).unwrap();
        assert!(window.contains(d(2026, 12, 31)));
        // December 2026 ends on a Thursday; the grid runs into January
        assert!(window.contains(d(2027, 1, 1)));
        assert_eq!(window.days().count() % 7, 0);
    }

    #[test]
    fn month_grid_window_invalid_month() {
        assert!(month_grid_window(2026, 12).is_none());
    }

    #[test]
    fn add_days_negative() {
        assert_eq!(add_days(d(2026, 1, 1), -1), d(2025, 12, 31));
    }
}
