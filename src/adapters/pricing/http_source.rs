use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::types::PricingConfig;
use crate::domain::pricing::PricingRecord;
use crate::error::{DashboardError, Result};
use crate::ports::pricing::PricingSource;

/// Fetches `pricing_<year>.json` datasets from the configured base URL.
pub struct HttpPricingSource {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpPricingSource {
    pub fn new(config: &PricingConfig) -> Result<Self> {
        // A base URL without a trailing slash would drop its last path
        // segment on join().
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| DashboardError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    fn year_url(&self, year: i32) -> Result<Url> {
        Ok(self.base_url.join(&format!("pricing_{year}.json"))?)
    }
}

#[async_trait]
impl PricingSource for HttpPricingSource {
    async fn fetch_year(&self, year: i32) -> Result<Vec<PricingRecord>> {
        let url = self.year_url(year)?;
        tracing::debug!("Fetching pricing dataset from {url}");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(DashboardError::PricingUnavailable { year });
        }
        let records: Vec<PricingRecord> = response.json().await?;
        Ok(records)
    }
}
