//! Occupancy views: ISO-week stacked nights and calendar day fills.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::booking::{Booking, BookingKind};
use super::dates::{DayWindow, add_days, diff_days, iso_weeks_of_year, month_grid_window};

pub const NIGHTS_PER_WEEK: u32 = 7;

/// Night counters for one ISO week of the stacked occupancy chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekOccupancy {
    pub week: u32,
    pub start: NaiveDate,
    pub platform_nights: u32,
    pub owner_nights: u32,
    pub free_nights: u32,
}

impl WeekOccupancy {
    pub fn occupied(&self) -> u32 {
        self.platform_nights + self.owner_nights
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekStack {
    pub year: i32,
    pub weeks: Vec<WeekOccupancy>,
}

/// Distribute every occupied night of `year` into its ISO week.
///
/// Bookings are clipped to the calendar year first. Nights whose ISO week
/// belongs to an adjacent year (the first days of January or the last days
/// of December) are dropped from this view; the calendar view still renders
/// them via window clipping.
pub fn week_stack(bookings: &[Booking], year: i32) -> WeekStack {
    let weeks = iso_weeks_of_year(year);
    let mut platform = vec![0_u32; weeks.len()];
    let mut owner = vec![0_u32; weeks.len()];

    let year_start = NaiveDate::from_ymd_opt(year, 1, 1);
    let year_end = NaiveDate::from_ymd_opt(year + 1, 1, 1);
    if let (Some(year_start), Some(year_end)) = (year_start, year_end) {
        for b in bookings {
            let s = b.start.max(year_start);
            let e = b.end.min(year_end);
            if e <= s {
                continue;
            }
            for offset in 0..diff_days(s, e) {
                let night = add_days(s, offset);
                let iso = night.iso_week();
                if iso.year() != year {
                    continue;
                }
                let idx = (iso.week() - 1) as usize;
                match b.kind {
                    BookingKind::Owner => owner[idx] += 1,
                    BookingKind::Platform => platform[idx] += 1,
                }
            }
        }
    }

    let weeks = weeks
        .into_iter()
        .enumerate()
        .map(|(i, span)| WeekOccupancy {
            week: span.week,
            start: span.start,
            platform_nights: platform[i],
            owner_nights: owner[i],
            free_nights: NIGHTS_PER_WEEK.saturating_sub(platform[i] + owner[i]),
        })
        .collect();

    WeekStack { year, weeks }
}

impl std::fmt::Display for WeekStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "# Week occupancy {}", self.year)?;
        writeln!(
            f,
            "{:<10} {:>9} {:>6} {:>5}",
            "Week", "Platform", "Owner", "Free"
        )?;
        for w in &self.weeks {
            writeln!(
                f,
                "{:<10} {:>9} {:>6} {:>5}",
                format!("{}-W{:02}", self.year, w.week),
                w.platform_nights,
                w.owner_nights,
                w.free_nights
            )?;
        }
        Ok(())
    }
}

/// How a booking paints one calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillKind {
    /// Arrival day: the guest holds the later half of the day.
    HalfRight,
    /// A night fully inside the stay.
    Full,
    /// Checkout day: the earlier half still belongs to the departing guest.
    HalfLeft,
}

/// One fill instruction for a calendar cell, with a back-reference into the
/// booking slice the fills were computed from (for tooltips).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DayFill {
    pub date: NaiveDate,
    pub kind: FillKind,
    pub booking_kind: BookingKind,
    pub booking: usize,
}

/// Compute cell fills for every booking intersecting the visible window.
///
/// Each booking's `[start, end)` range is clipped to the window; the
/// (clipped) arrival day gets a half-right fill, the checkout day a
/// half-left fill when it is still visible, and the days strictly between
/// them full fills. Callers apply platform/owner visibility toggles before
/// calling — hidden bookings must not occupy cells at all.
pub fn day_fills(bookings: &[Booking], window: DayWindow) -> Vec<DayFill> {
    let mut fills = Vec::new();
    for (index, b) in bookings.iter().enumerate() {
        let s = b.start.max(window.start);
        let e = b.end.min(window.end_exclusive);
        if e <= s {
            continue;
        }

        let mut push = |date: NaiveDate, kind: FillKind| {
            fills.push(DayFill {
                date,
                kind,
                booking_kind: b.kind,
                booking: index,
            });
        };

        push(s, FillKind::HalfRight);
        for offset in 1..diff_days(s, e) {
            push(add_days(s, offset), FillKind::Full);
        }
        if e < window.end_exclusive {
            push(e, FillKind::HalfLeft);
        }
    }
    fills
}

/// Fills grouped per visible day, for grid rendering.
pub fn fills_by_day(fills: &[DayFill]) -> BTreeMap<NaiveDate, Vec<DayFill>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<DayFill>> = BTreeMap::new();
    for fill in fills {
        by_day.entry(fill.date).or_default().push(*fill);
    }
    by_day
}

/// Fill instructions for one Monday-start month grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month0: u32,
    pub window: DayWindow,
    pub fills: Vec<DayFill>,
}

pub fn month_grid(bookings: &[Booking], year: i32, month0: u32) -> Option<MonthGrid> {
    let window = month_grid_window(year, month0)?;
    Some(MonthGrid {
        year,
        month0,
        window,
        fills: day_fills(bookings, window),
    })
}
