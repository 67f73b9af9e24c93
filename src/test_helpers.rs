use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::adapters::sheet::RawRow;
use crate::domain::booking::{Booking, BookingKind, PartySize};
use crate::domain::dates::diff_days;
use crate::domain::pricing::PricingRecord;
use crate::error::{DashboardError, Result};
use crate::ports::pricing::PricingSource;

type FetchFn = Box<dyn Fn(i32) -> Result<Vec<PricingRecord>> + Send + Sync>;

/// Programmable [`PricingSource`]: canned per-year datasets, per-year
/// failures, or a custom fetch closure.
#[derive(Default)]
pub struct MockPricingSource {
    years: HashMap<i32, Option<Vec<PricingRecord>>>,
    fetch_fn: Mutex<Option<FetchFn>>,
}

impl MockPricingSource {
    #[must_use]
    pub fn with_year(mut self, year: i32, records: Vec<PricingRecord>) -> Self {
        self.years.insert(year, Some(records));
        self
    }

    #[must_use]
    pub fn with_year_error(mut self, year: i32) -> Self {
        self.years.insert(year, None);
        self
    }

    #[must_use]
    pub fn with_fetch(self, f: impl Fn(i32) -> Result<Vec<PricingRecord>> + Send + Sync + 'static) -> Self {
        *self.fetch_fn.lock().unwrap() = Some(Box::new(f));
        self
    }
}

#[async_trait]
impl PricingSource for MockPricingSource {
    async fn fetch_year(&self, year: i32) -> Result<Vec<PricingRecord>> {
        if let Some(f) = self.fetch_fn.lock().unwrap().as_ref() {
            return f(year);
        }
        match self.years.get(&year) {
            Some(Some(records)) => Ok(records.clone()),
            Some(None) => Err(DashboardError::PricingUnavailable { year }),
            None => Ok(vec![]),
        }
    }
}

// --- Factory functions ---

/// Platform booking with nights derived from the date range and net income
/// at the default retention factor.
pub fn make_booking(start: NaiveDate, end: NaiveDate, gross: Option<f64>) -> Booking {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let nights = diff_days(start, end) as u32;
    Booking {
        start,
        end,
        nights,
        gross_income: gross,
        net_income: gross.unwrap_or(0.0) * 0.76,
        kind: BookingKind::Platform,
        guest: String::new(),
        channel: String::new(),
        country_code: String::new(),
        phone: String::new(),
        email: String::new(),
        party: PartySize::default(),
    }
}

pub fn make_owner_booking(start: NaiveDate, end: NaiveDate) -> Booking {
    let mut booking = make_booking(start, end, None);
    booking.kind = BookingKind::Owner;
    booking.channel = "Huiseigenaar".into();
    booking
}

pub fn make_row(pairs: &[(&str, Value)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

pub fn make_pricing_record(iso_date: &str, day_price: f64) -> PricingRecord {
    PricingRecord {
        date: iso_date.parse().expect("valid ISO date"),
        season: None,
        min_nights: Some(2),
        day_price: Some(day_price),
        week_price: None,
    }
}
