//! Top-level KPI summary for the dashboard header tiles.

use serde::{Deserialize, Serialize};

use super::booking::{Booking, arrival_years};
use super::money::format_eur;

/// Occupancy denominators use a flat 365-day year. Leap days are ignored,
/// matching the figures the dashboard has always reported; the resulting
/// error is at most 1/365 per leap year in the data.
pub const DAYS_IN_YEAR: i64 = 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSummary {
    pub bookings: u32,
    pub owner_bookings: u32,
    pub nights: u32,
    pub owner_nights: u32,
    pub nights_free: i64,
    /// Occupied fraction of the available days (0.0 – 1.0, may exceed 1.0
    /// when bookings overlap).
    pub occupancy: f64,
    pub gross_revenue: f64,
    pub net_revenue: f64,
    pub gross_per_night: f64,
    pub net_per_night: f64,
}

/// Compute the KPI tile values over the full booking set.
///
/// Owner-use bookings count toward occupancy but never toward revenue;
/// per-night figures divide by platform nights only and fall back to zero
/// when there are none.
pub fn compute_kpis(bookings: &[Booking]) -> KpiSummary {
    let (platform, owner): (Vec<&Booking>, Vec<&Booking>) =
        bookings.iter().partition(|b| !b.is_owner_use());

    let nights: u32 = platform.iter().map(|b| b.nights).sum();
    let owner_nights: u32 = owner.iter().map(|b| b.nights).sum();
    let occupied = i64::from(nights) + i64::from(owner_nights);

    let years_in_data = arrival_years(bookings).len().max(1) as i64;
    let total_days = years_in_data * DAYS_IN_YEAR;

    let gross_revenue: f64 = platform.iter().map(|b| b.gross_contribution()).sum();
    let net_revenue: f64 = platform.iter().map(|b| b.net_income).sum();

    let per_night = |revenue: f64| {
        if nights > 0 {
            revenue / f64::from(nights)
        } else {
            0.0
        }
    };

    #[allow(clippy::cast_precision_loss)]
    let occupancy = occupied as f64 / total_days as f64;

    KpiSummary {
        bookings: platform.len() as u32,
        owner_bookings: owner.len() as u32,
        nights,
        owner_nights,
        nights_free: (total_days - occupied).max(0),
        occupancy,
        gross_revenue,
        net_revenue,
        gross_per_night: per_night(gross_revenue),
        net_per_night: per_night(net_revenue),
    }
}

impl std::fmt::Display for KpiSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "# Booking KPIs")?;
        writeln!(
            f,
            "Bookings: {} platform, {} owner",
            self.bookings, self.owner_bookings
        )?;
        writeln!(
            f,
            "Nights: {} platform, {} owner, {} free",
            self.nights, self.owner_nights, self.nights_free
        )?;
        writeln!(f, "Occupancy: {:.1}%", self.occupancy * 100.0)?;
        writeln!(
            f,
            "Gross revenue: {} ({}/night)",
            format_eur(self.gross_revenue),
            format_eur(self.gross_per_night)
        )?;
        writeln!(
            f,
            "Net revenue: {} ({}/night)",
            format_eur(self.net_revenue),
            format_eur(self.net_per_night)
        )?;
        Ok(())
    }
}
