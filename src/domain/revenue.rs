//! Revenue aggregation: monthly buckets and the cumulative daily series.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::booking::Booking;
use super::dates::add_days;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueMode {
    Gross,
    Net,
}

/// Season filter for the monthly revenue chart. Months are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    All,
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn month0s(self) -> &'static [u32] {
        match self {
            Self::All => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            Self::Winter => &[11, 0, 1, 2],
            Self::Spring => &[3, 4],
            Self::Summer => &[5, 6, 7],
            Self::Autumn => &[8, 9, 10],
        }
    }

    pub fn contains_month0(self, month0: u32) -> bool {
        self.month0s().contains(&month0)
    }
}

/// Dutch short month labels, as rendered on the chart axis.
pub fn month_label(month0: u32) -> &'static str {
    const LABELS: [&str; 12] = [
        "JAN", "FEB", "MRT", "APR", "MEI", "JUN", "JUL", "AUG", "SEP", "OKT", "NOV", "DEC",
    ];
    LABELS.get(month0 as usize).copied().unwrap_or("?")
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Zero-based calendar month.
    pub month0: u32,
    pub gross: f64,
    pub net: f64,
}

impl MonthBucket {
    pub fn amount(&self, mode: RevenueMode) -> f64 {
        match mode {
            RevenueMode::Gross => self.gross,
            RevenueMode::Net => self.net,
        }
    }
}

/// Revenue per arrival month within `year`, one zero-filled bucket for every
/// month the season selects (months without bookings still appear).
pub fn monthly_revenue(bookings: &[Booking], year: i32, season: Season) -> Vec<MonthBucket> {
    let mut by_month = [(0.0_f64, 0.0_f64); 12];
    for b in bookings.iter().filter(|b| b.start.year() == year) {
        let m = b.start.month0() as usize;
        by_month[m].0 += b.gross_contribution();
        by_month[m].1 += b.net_income;
    }

    let mut month0s: Vec<u32> = season.month0s().to_vec();
    month0s.sort_unstable();
    month0s
        .into_iter()
        .map(|month0| MonthBucket {
            month0,
            gross: by_month[month0 as usize].0,
            net: by_month[month0 as usize].1,
        })
        .collect()
}

/// Per-day metadata for days that have at least one arrival.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPoint {
    pub date: NaiveDate,
    /// Summed booking amount for this arrival day, in the selected mode.
    pub amount: f64,
    pub nights: u32,
    pub owner_use: bool,
}

/// Forward-filled cumulative revenue, one data point per calendar day from
/// the earliest to the latest arrival. `points[i]` is `None` on days
/// without arrivals, so the chart can show markers on booking days only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CumulativeSeries {
    pub labels: Vec<NaiveDate>,
    pub values: Vec<f64>,
    pub points: Vec<Option<DayPoint>>,
}

pub fn cumulative_daily(bookings: &[Booking], mode: RevenueMode) -> CumulativeSeries {
    if bookings.is_empty() {
        return CumulativeSeries::default();
    }

    struct DayTotals {
        amount: f64,
        nights: u32,
        owner_use: bool,
    }

    let mut by_day: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for b in bookings {
        let amount = match mode {
            RevenueMode::Gross => b.gross_contribution(),
            RevenueMode::Net => b.net_income,
        };
        by_day
            .entry(b.start)
            .and_modify(|t| {
                t.amount += amount;
                t.nights += b.nights;
                t.owner_use |= b.is_owner_use();
            })
            .or_insert(DayTotals {
                amount,
                nights: b.nights,
                owner_use: b.is_owner_use(),
            });
    }

    // BTreeMap keys are sorted, so first/last give the series span.
    let (Some(&first), Some(&last)) = (by_day.keys().next(), by_day.keys().next_back()) else {
        return CumulativeSeries::default();
    };

    let mut series = CumulativeSeries::default();
    let mut running = 0.0;
    let mut day = first;
    while day <= last {
        if let Some(totals) = by_day.get(&day) {
            running += totals.amount;
            series.points.push(Some(DayPoint {
                date: day,
                amount: totals.amount,
                nights: totals.nights,
                owner_use: totals.owner_use,
            }));
        } else {
            series.points.push(None);
        }
        series.labels.push(day);
        series.values.push(running);
        day = add_days(day, 1);
    }
    series
}
