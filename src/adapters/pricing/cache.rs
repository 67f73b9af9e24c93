use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::task::JoinSet;

use crate::domain::pricing::PricingRecord;
use crate::ports::pricing::PricingSource;

type YearMap = HashMap<String, PricingRecord>;

/// Year-keyed pricing cache, populated lazily from a [`PricingSource`].
///
/// A failed fetch caches an empty map for that year, so missing data
/// degrades to "no price" lookups instead of repeated refetches, and one
/// broken year never blocks the others. The cache lives for the whole
/// session; bookings and aggregates are rebuilt around it.
pub struct PricingCache {
    source: Arc<dyn PricingSource>,
    years: RwLock<HashMap<i32, YearMap>>,
}

impl PricingCache {
    pub fn new(source: Arc<dyn PricingSource>) -> Self {
        Self {
            source,
            years: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch every not-yet-cached year in parallel. Awaiting this is what
    /// guarantees subsequent lookups see the data; calling [`Self::lookup`]
    /// earlier is safe and simply returns `None`.
    pub async fn preload(&self, years: &[i32]) {
        let missing: Vec<i32> = {
            let cached = match self.years.read() {
                Ok(guard) => guard,
                Err(_) => {
                    tracing::error!("Pricing cache lock poisoned, skipping preload");
                    return;
                }
            };
            let mut missing: Vec<i32> = years
                .iter()
                .copied()
                .filter(|y| !cached.contains_key(y))
                .collect();
            missing.sort_unstable();
            missing.dedup();
            missing
        };

        if missing.is_empty() {
            return;
        }

        let mut jobs = JoinSet::new();
        for year in missing {
            let source = Arc::clone(&self.source);
            jobs.spawn(async move { (year, source.fetch_year(year).await) });
        }

        let mut fetched: Vec<(i32, YearMap)> = Vec::new();
        while let Some(joined) = jobs.join_next().await {
            match joined {
                Ok((year, Ok(records))) => {
                    tracing::debug!("Loaded {} pricing records for {year}", records.len());
                    let map = records.into_iter().map(|r| (r.iso_date(), r)).collect();
                    fetched.push((year, map));
                }
                Ok((year, Err(err))) => {
                    tracing::warn!("No pricing data for year {year}: {err}");
                    fetched.push((year, YearMap::new()));
                }
                Err(err) => {
                    tracing::error!("Pricing fetch task failed: {err}");
                }
            }
        }

        if let Ok(mut cached) = self.years.write() {
            for (year, map) in fetched {
                cached.insert(year, map);
            }
        } else {
            tracing::error!("Pricing cache lock poisoned, discarding fetched data");
        }
    }

    /// Pricing for an ISO `YYYY-MM-DD` date. `None` when the year was never
    /// preloaded, its dataset is missing, or the day has no entry.
    pub fn lookup(&self, iso_date: &str) -> Option<PricingRecord> {
        let year: i32 = iso_date.get(..4)?.parse().ok()?;
        let cached = self.years.read().ok()?;
        cached.get(&year)?.get(iso_date).cloned()
    }

    /// Whether a year has been preloaded (successfully or as empty).
    pub fn is_loaded(&self, year: i32) -> bool {
        self.years
            .read()
            .map(|cached| cached.contains_key(&year))
            .unwrap_or(false)
    }
}
