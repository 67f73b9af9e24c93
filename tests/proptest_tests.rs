//! Property tests for the parsing and aggregation invariants.

use chrono::NaiveDate;
use proptest::prelude::*;

use lodge_metrics::adapters::sheet::RowNormalizer;
use lodge_metrics::domain::booking::{Booking, BookingKind, PartySize};
use lodge_metrics::domain::dates::{DayWindow, format_date_local, parse_local_date};
use lodge_metrics::domain::kpi::compute_kpis;
use lodge_metrics::domain::money::{format_eur, money_cell, parse_money};
use lodge_metrics::domain::occupancy::{FillKind, day_fills, week_stack};
use lodge_metrics::domain::revenue::{RevenueMode, cumulative_daily};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020..2030_i32, 1..=12_u32, 1..=28_u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn booking(start: NaiveDate, end: NaiveDate, gross: Option<f64>) -> Booking {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let nights = (end - start).num_days().max(0) as u32;
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

/// Disjoint bookings inside one calendar year: alternating gap/stay runs
/// laid out left to right from an early-January anchor.
fn arb_disjoint_bookings(year: i32) -> impl Strategy<Value = Vec<Booking>> {
    prop::collection::vec((0..10_i64, 1..7_i64, 50.0..500.0_f64), 0..20).prop_map(move |runs| {
        let mut cursor = NaiveDate::from_ymd_opt(year, 1, 2).unwrap();
        let year_end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();
        let mut bookings = Vec::new();
        for (gap, len, gross) in runs {
            let start = cursor + chrono::Days::new(gap as u64);
            let end = start + chrono::Days::new(len as u64);
            if end > year_end {
                break;
            }
            bookings.push(booking(start, end, Some(gross)));
            cursor = end;
        }
        bookings
    })
}

// ---------------------------------------------------------------------------
// Date and money parsing
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_date_format_round_trips(date in arb_date()) {
        let formatted = format_date_local(date);
        prop_assert_eq!(parse_local_date(&formatted), Some(date));
    }

    #[test]
    fn prop_date_parser_never_panics(s in "\\PC{0,40}") {
        let _ = parse_local_date(&s);
    }

    #[test]
    fn prop_money_parser_never_panics(s in "\\PC{0,40}") {
        let _ = parse_money(&s);
    }

    #[test]
    fn prop_money_numeric_cells_are_idempotent(amount in -1.0e9..1.0e9_f64) {
        // A numeric income cell must survive ingestion unchanged
        let cell = serde_json::json!(amount);
        prop_assert_eq!(money_cell(&cell), Some(amount));
    }

    #[test]
    fn prop_money_format_round_trips(amount in 0.0..10_000_000.0_f64) {
        // Parsing the rendered value recovers the amount at cent precision
        let cents = (amount * 100.0).round() / 100.0;
        let parsed = parse_money(&format_eur(cents)).unwrap();
        prop_assert!((parsed - cents).abs() < 0.005, "{cents} vs {parsed}");
    }
}

// ---------------------------------------------------------------------------
// Normalization totality
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_normalizer_is_total_and_orders_dates(
        arrival in "\\PC{0,20}",
        departure in "\\PC{0,20}",
        income in "\\PC{0,12}",
    ) {
        let row = [
            ("Aankomst".to_string(), serde_json::json!(arrival)),
            ("Vertrek".to_string(), serde_json::json!(departure)),
            ("Inkomsten".to_string(), serde_json::json!(income)),
        ]
        .into_iter()
        .collect();

        if let Some(b) = RowNormalizer::default().normalize(&row) {
            prop_assert!(b.end > b.start);
            prop_assert!(b.stay_days() > 0);
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation invariants
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_fill_coverage_inside_window(
        start in arb_date(),
        len in 1..20_i64,
    ) {
        let end = start + chrono::Days::new(len as u64);
        let b = booking(start, end, Some(100.0));
        let window = DayWindow {
            start: start - chrono::Days::new(40),
            end_exclusive: end + chrono::Days::new(40),
        };

        let fills = day_fills(std::slice::from_ref(&b), window);

        // Arrival half, checkout half, and every night in between
        prop_assert_eq!(fills.len() as i64, len + 1);
        prop_assert_eq!(fills.first().unwrap().date, start);
        prop_assert_eq!(fills.first().unwrap().kind, FillKind::HalfRight);
        prop_assert_eq!(fills.last().unwrap().date, end);
        prop_assert_eq!(fills.last().unwrap().kind, FillKind::HalfLeft);
        for (offset, fill) in fills.iter().enumerate() {
            prop_assert_eq!(fill.date, start + chrono::Days::new(offset as u64));
        }
    }

    #[test]
    fn prop_cumulative_series_is_monotone(bookings in arb_disjoint_bookings(2026)) {
        let series = cumulative_daily(&bookings, RevenueMode::Gross);
        for pair in series.values.windows(2) {
            prop_assert!(pair[1] >= pair[0]);
        }
        prop_assert_eq!(series.labels.len(), series.values.len());
        prop_assert_eq!(series.labels.len(), series.points.len());
    }

    #[test]
    fn prop_week_stack_balances_to_seven(bookings in arb_disjoint_bookings(2026)) {
        let stack = week_stack(&bookings, 2026);
        for week in &stack.weeks {
            prop_assert_eq!(week.platform_nights + week.owner_nights + week.free_nights, 7);
        }
    }

    #[test]
    fn prop_disjoint_bookings_never_exceed_a_year(bookings in arb_disjoint_bookings(2026)) {
        let kpis = compute_kpis(&bookings);
        prop_assert!(i64::from(kpis.nights) + i64::from(kpis.owner_nights) <= 365);
        prop_assert!(kpis.occupancy <= 1.0 + f64::EPSILON);
        prop_assert!(kpis.nights_free >= 0);
    }

    #[test]
    fn prop_kpi_revenue_is_additive(bookings in arb_disjoint_bookings(2026)) {
        let kpis = compute_kpis(&bookings);
        let gross: f64 = bookings.iter().map(Booking::gross_contribution).sum();
        prop_assert!((kpis.gross_revenue - gross).abs() < 1e-6);
        prop_assert!((kpis.net_revenue - gross * 0.76).abs() < 1e-6);
    }
}
