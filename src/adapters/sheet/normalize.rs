//! Raw row → canonical [`Booking`] normalization.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use serde_json::Value;

use crate::config::types::RevenueConfig;
use crate::domain::booking::{Booking, BookingKind, PartySize};
use crate::domain::dates::diff_days;
use crate::domain::money::money_cell;

use super::classify::is_owner_use;
use super::fields::{self, RawRow, cell, count_cell, date_cell, number_cell, text_cell};

/// Channel shown for owner stays that carry no booking label.
const OWNER_CHANNEL: &str = "Huiseigenaar";

/// Maps one raw spreadsheet row into a [`Booking`], applying ownership
/// classification and the gross/net revenue split. Pure per row; the full
/// pipeline is [`RowNormalizer::normalize_all`].
#[derive(Debug, Clone)]
pub struct RowNormalizer {
    net_factor: f64,
}

impl Default for RowNormalizer {
    fn default() -> Self {
        Self::new(RevenueConfig::default().net_factor)
    }
}

impl RowNormalizer {
    pub fn new(net_factor: f64) -> Self {
        Self { net_factor }
    }

    /// `None` when the row has no parsable arrival/departure pair or the
    /// departure does not lie after the arrival; such rows are dropped
    /// without becoming partial records.
    pub fn normalize(&self, row: &RawRow) -> Option<Booking> {
        let start = cell(row, fields::ARRIVAL).and_then(date_cell)?;
        let end = cell(row, fields::DEPARTURE).and_then(date_cell)?;
        if end <= start {
            return None;
        }

        let owner = is_owner_use(row);

        // The source night count wins for KPI sums when it is a usable
        // number; the date range is authoritative everywhere else.
        let nights = cell(row, fields::NIGHTS)
            .and_then(number_cell)
            .filter(|n| *n > 0.0)
            .map_or_else(|| diff_days(start, end) as u32, |n| n.trunc() as u32);

        let parsed_income = cell(row, fields::INCOME).and_then(money_cell);
        let (gross_income, net_income) = if owner {
            (None, 0.0)
        } else {
            (parsed_income, parsed_income.unwrap_or(0.0) * self.net_factor)
        };

        let label = cell(row, fields::BOOKING_LABEL)
            .and_then(text_cell)
            .unwrap_or_default();

        Some(Booking {
            start,
            end,
            nights,
            gross_income,
            net_income,
            kind: if owner {
                BookingKind::Owner
            } else {
                BookingKind::Platform
            },
            channel: channel_from_label(&label, owner),
            guest: cell(row, fields::GUEST)
                .and_then(text_cell)
                .unwrap_or_default(),
            country_code: cell(row, fields::COUNTRY)
                .and_then(text_cell)
                .map(|c| c.to_uppercase())
                .unwrap_or_default(),
            phone: normalize_phone(cell(row, fields::PHONE)),
            email: cell(row, fields::EMAIL)
                .and_then(text_cell)
                .unwrap_or_default(),
            party: PartySize {
                adults: count_cell(cell(row, fields::ADULTS)),
                children: count_cell(cell(row, fields::CHILDREN)),
                infants: count_cell(cell(row, fields::INFANTS)),
            },
        })
    }

    /// Normalize an uploaded sheet; rows that fail to normalize are
    /// silently dropped from the result.
    pub fn normalize_all(&self, rows: &[RawRow]) -> Vec<Booking> {
        let bookings: Vec<Booking> = rows.iter().filter_map(|r| self.normalize(r)).collect();
        let dropped = rows.len() - bookings.len();
        if dropped > 0 {
            tracing::debug!("Dropped {dropped} rows without a valid date range");
        }
        bookings
    }
}

/// The booking label is a composite `reference | channel`; the channel is
/// its second segment. Unlabeled owner rows fall back to the owner marker.
fn channel_from_label(label: &str, owner: bool) -> String {
    if let Some((_, rest)) = label.split_once('|') {
        rest.split('|').next().unwrap_or_default().trim().to_string()
    } else if !label.is_empty() {
        label.to_string()
    } else if owner {
        OWNER_CHANNEL.to_string()
    } else {
        String::new()
    }
}

fn normalize_phone(cell: Option<&Value>) -> String {
    match cell {
        // Spreadsheets happily turn phone columns into numbers
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .map(|v| v.to_string())
            .unwrap_or_default(),
        Some(Value::String(s)) => s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect(),
        _ => String::new(),
    }
}
