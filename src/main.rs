use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use lodge_metrics::adapters::pricing::cache::PricingCache;
use lodge_metrics::adapters::pricing::http_source::HttpPricingSource;
use lodge_metrics::adapters::sheet::RowNormalizer;
use lodge_metrics::adapters::sheet::reader::read_rows;
use lodge_metrics::config::load_config;
use lodge_metrics::domain::money::format_eur;
use lodge_metrics::domain::revenue::month_label;
use lodge_metrics::state::{DashboardState, StatePatch};

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [
        PathBuf::from("config.yaml"),
        dirs_next().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn dirs_next() -> PathBuf {
    // Look in the directory where the binary is
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let export = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: lodge-metrics <bookings.csv>"))?;

    let config = load_config(&find_config_path())?;

    let rows = read_rows(Path::new(&export))?;
    let bookings = RowNormalizer::new(config.revenue.net_factor).normalize_all(&rows);
    tracing::info!("Normalized {} of {} rows", bookings.len(), rows.len());

    let mut state = DashboardState::new();
    state.apply(StatePatch {
        bookings: Some(bookings),
        ..StatePatch::default()
    });

    let pricing = PricingCache::new(Arc::new(HttpPricingSource::new(&config.pricing)?));
    pricing.preload(&state.occupancy_years()).await;

    println!("{}", state.kpis());

    println!("# Revenue per month {}", state.filters.current_year);
    println!("{:<5} {:>14} {:>14}", "Month", "Gross", "Net");
    for bucket in state.monthly() {
        println!(
            "{:<5} {:>14} {:>14}",
            month_label(bucket.month0),
            format_eur(bucket.gross),
            format_eur(bucket.net)
        );
    }
    println!();

    for stack in state.week_stacks() {
        println!("{stack}");
    }

    let today = chrono::Local::now().date_naive();
    if let Some(stay) = state.current_or_next_stay(today) {
        println!("{stay}");
        let arrival = stay.start.format("%Y-%m-%d").to_string();
        match pricing.lookup(&arrival) {
            Some(record) => println!("Pricing on arrival: {record}"),
            None => println!("Pricing on arrival: no data"),
        }
    }

    Ok(())
}
