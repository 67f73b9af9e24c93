//! The single application-state container.
//!
//! All mutable session state — the normalized booking list and the view
//! filters — lives here, mutated only through [`DashboardState::apply`].
//! Every view-model accessor recomputes from the canonical booking list;
//! nothing derived is cached.

use chrono::{Datelike, NaiveDate};

use crate::domain::booking::{Booking, arrival_years, spanned_years};
use crate::domain::kpi::{KpiSummary, compute_kpis};
use crate::domain::occupancy::{MonthGrid, WeekStack, month_grid, week_stack};
use crate::domain::revenue::{
    CumulativeSeries, MonthBucket, RevenueMode, Season, cumulative_daily, monthly_revenue,
};

/// Year scope of a chart: one calendar year, or every year in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearSelection {
    All,
    Year(i32),
}

#[derive(Debug, Clone)]
pub struct ViewFilters {
    /// Year driving the monthly revenue chart.
    pub current_year: i32,
    pub season: Season,
    pub mode: RevenueMode,
    pub cumulative_year: YearSelection,
    pub occupancy_year: YearSelection,
    pub show_platform: bool,
    pub show_owner: bool,
}

impl Default for ViewFilters {
    fn default() -> Self {
        Self {
            current_year: chrono::Local::now().year(),
            season: Season::All,
            mode: RevenueMode::Gross,
            cumulative_year: YearSelection::All,
            occupancy_year: YearSelection::All,
            show_platform: true,
            show_owner: true,
        }
    }
}

/// One partial state update; `None` fields stay untouched. Replacing the
/// bookings re-derives the year filters, as a fresh upload does.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub bookings: Option<Vec<Booking>>,
    pub current_year: Option<i32>,
    pub season: Option<Season>,
    pub mode: Option<RevenueMode>,
    pub cumulative_year: Option<YearSelection>,
    pub occupancy_year: Option<YearSelection>,
    pub show_platform: Option<bool>,
    pub show_owner: Option<bool>,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    bookings: Vec<Booking>,
    pub filters: ViewFilters,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Single mutation entry point.
    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(bookings) = patch.bookings {
            self.load_bookings(bookings);
        }
        if let Some(year) = patch.current_year {
            self.filters.current_year = year;
        }
        if let Some(season) = patch.season {
            self.filters.season = season;
        }
        if let Some(mode) = patch.mode {
            self.filters.mode = mode;
        }
        if let Some(selection) = patch.cumulative_year {
            self.filters.cumulative_year = selection;
        }
        if let Some(selection) = patch.occupancy_year {
            self.filters.occupancy_year = selection;
        }
        if let Some(show) = patch.show_platform {
            self.filters.show_platform = show;
        }
        if let Some(show) = patch.show_owner {
            self.filters.show_owner = show;
        }
    }

    /// Replace the booking list wholesale (a new upload) and pull the year
    /// filters back onto years that actually occur in the data.
    fn load_bookings(&mut self, bookings: Vec<Booking>) {
        self.bookings = bookings;

        let years = self.years();
        if years.is_empty() {
            return;
        }
        let filters = &mut self.filters;
        if !years.contains(&filters.current_year) {
            filters.current_year = years[0];
        }
        match filters.cumulative_year {
            YearSelection::Year(y) if years.contains(&y) => {}
            _ => filters.cumulative_year = YearSelection::Year(filters.current_year),
        }
        match filters.occupancy_year {
            YearSelection::Year(y) if years.contains(&y) => {}
            _ => filters.occupancy_year = YearSelection::All,
        }
    }

    /// Arrival years present in the data, newest first.
    pub fn years(&self) -> Vec<i32> {
        arrival_years(&self.bookings)
    }

    fn visible(&self, booking: &Booking) -> bool {
        if booking.is_owner_use() {
            self.filters.show_owner
        } else {
            self.filters.show_platform
        }
    }

    /// Bookings that survive the platform/owner toggles, in sheet order.
    pub fn visible_bookings(&self) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| self.visible(b))
            .cloned()
            .collect()
    }

    /// KPI tiles always cover the full data set.
    pub fn kpis(&self) -> KpiSummary {
        compute_kpis(&self.bookings)
    }

    /// Monthly revenue for the selected year and season.
    pub fn monthly(&self) -> Vec<MonthBucket> {
        monthly_revenue(
            &self.bookings,
            self.filters.current_year,
            self.filters.season,
        )
    }

    /// Cumulative daily revenue for the selected year scope and mode.
    pub fn cumulative(&self) -> CumulativeSeries {
        let rows: Vec<Booking> = match self.filters.cumulative_year {
            YearSelection::All => self.bookings.clone(),
            YearSelection::Year(year) => self
                .bookings
                .iter()
                .filter(|b| b.start.year() == year)
                .cloned()
                .collect(),
        };
        cumulative_daily(&rows, self.filters.mode)
    }

    /// Years the occupancy page renders: the selected year, or every year
    /// any stay touches (falling back to the current filter year when the
    /// sheet is empty, so an empty calendar still has a page).
    pub fn occupancy_years(&self) -> Vec<i32> {
        match self.filters.occupancy_year {
            YearSelection::Year(year) => vec![year],
            YearSelection::All => {
                let years = spanned_years(&self.bookings);
                if years.is_empty() {
                    vec![self.filters.current_year]
                } else {
                    years
                }
            }
        }
    }

    /// One stacked week chart per occupancy year, toggles applied.
    pub fn week_stacks(&self) -> Vec<WeekStack> {
        let visible = self.visible_bookings();
        self.occupancy_years()
            .into_iter()
            .map(|year| week_stack(&visible, year))
            .collect()
    }

    /// Fill instructions for one month page of the occupancy calendar,
    /// along with the bookings the fills index into.
    pub fn month_grid(&self, year: i32, month0: u32) -> Option<(Vec<Booking>, MonthGrid)> {
        let visible = self.visible_bookings();
        let grid = month_grid(&visible, year, month0)?;
        Some((visible, grid))
    }

    /// All bookings ordered by arrival (the upcoming-bookings carousel).
    pub fn bookings_by_arrival(&self) -> Vec<&Booking> {
        let mut sorted: Vec<&Booking> = self.bookings.iter().collect();
        sorted.sort_by_key(|b| b.start);
        sorted
    }

    /// The stay containing `today`, else the first future arrival.
    pub fn current_or_next_stay(&self, today: NaiveDate) -> Option<&Booking> {
        let sorted = self.bookings_by_arrival();
        sorted
            .iter()
            .find(|b| b.occupies(today))
            .or_else(|| sorted.iter().find(|b| b.start > today))
            .copied()
    }
}
