use async_trait::async_trait;

use crate::domain::pricing::PricingRecord;
use crate::error::Result;

/// Source of per-year seasonal pricing datasets.
#[async_trait]
pub trait PricingSource: Send + Sync {
    async fn fetch_year(&self, year: i32) -> Result<Vec<PricingRecord>>;
}
