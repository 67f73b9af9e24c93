//! Canonical booking model produced by row normalization.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::dates::{diff_days, format_date_local};
use super::money::format_eur;

/// Who occupies the property for a booking's date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingKind {
    /// Paying guest reservation made through a booking channel.
    Platform,
    /// The owner blocked the range for personal use; counts toward
    /// occupancy, never toward revenue.
    Owner,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySize {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl PartySize {
    pub fn total(&self) -> u32 {
        self.adults + self.children + self.infants
    }
}

/// One normalized booking. Occupies the half-open interval `[start, end)`;
/// `end` is the checkout day, the first night NOT spent at the property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Night count as reported by the source row, falling back to the
    /// date-range length. KPI sums use this; calendar rendering always
    /// derives its own count from the clipped date range.
    pub nights: u32,
    /// Parsed income. `None` for owner-use rows and unparsable cells so
    /// displays can show a placeholder; revenue sums read it through
    /// [`Booking::gross_contribution`].
    pub gross_income: Option<f64>,
    pub net_income: f64,
    pub kind: BookingKind,
    pub guest: String,
    pub channel: String,
    pub country_code: String,
    pub phone: String,
    pub email: String,
    pub party: PartySize,
}

impl Booking {
    pub fn is_owner_use(&self) -> bool {
        self.kind == BookingKind::Owner
    }

    /// Length of `[start, end)` in days.
    pub fn stay_days(&self) -> i64 {
        diff_days(self.start, self.end)
    }

    /// Gross revenue this booking adds to sums: zero for owner use and for
    /// rows whose income cell could not be parsed.
    pub fn gross_contribution(&self) -> f64 {
        match self.kind {
            BookingKind::Platform => self.gross_income.unwrap_or(0.0),
            BookingKind::Owner => 0.0,
        }
    }

    /// Rent per night for tooltips; `None` without income or nights.
    pub fn income_per_night(&self) -> Option<f64> {
        let income = self.gross_income?;
        if self.nights == 0 {
            return None;
        }
        Some(income / f64::from(self.nights))
    }

    /// True when any night or the checkout day touches the calendar year,
    /// including stays crossing December 31st.
    pub fn intersects_year(&self, year: i32) -> bool {
        let Some(year_start) = NaiveDate::from_ymd_opt(year, 1, 1) else {
            return false;
        };
        let Some(year_end) = NaiveDate::from_ymd_opt(year + 1, 1, 1) else {
            return false;
        };
        self.start < year_end && self.end > year_start
    }

    /// True when `day` falls within the stay, checkout day excluded.
    pub fn occupies(&self, day: NaiveDate) -> bool {
        day >= self.start && day < self.end
    }
}

impl std::fmt::Display for Booking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guest = if self.guest.is_empty() {
            "Unknown guest"
        } else {
            &self.guest
        };
        writeln!(f, "# {guest}")?;
        let kind = match self.kind {
            BookingKind::Owner => "Owner use",
            BookingKind::Platform if !self.channel.is_empty() => &self.channel,
            BookingKind::Platform => "Platform",
        };
        writeln!(f, "Type: {kind}")?;
        writeln!(
            f,
            "Period: {} – {} ({} nights)",
            format_date_local(self.start),
            format_date_local(self.end),
            self.nights
        )?;
        let per_night = self
            .income_per_night()
            .map_or_else(|| "—".to_string(), format_eur);
        writeln!(f, "Per night: {per_night}")?;
        Ok(())
    }
}

/// Distinct arrival years present in the data, newest first. Drives the
/// year dropdowns.
pub fn arrival_years(bookings: &[Booking]) -> Vec<i32> {
    let mut years: Vec<i32> = bookings.iter().map(|b| b.start.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Union of arrival and checkout years, ascending. The "ALL years"
/// calendar view renders one grid page per entry.
pub fn spanned_years(bookings: &[Booking]) -> Vec<i32> {
    let mut years: Vec<i32> = bookings
        .iter()
        .flat_map(|b| [b.start.year(), b.end.year()])
        .collect();
    years.sort_unstable();
    years.dedup();
    years
}
