use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub revenue: RevenueConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Base URL under which `pricing_<year>.json` files are published.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevenueConfig {
    /// Retention factor applied to gross income to approximate after-fee
    /// revenue.
    #[serde(default = "default_net_factor")]
    pub net_factor: f64,
}

impl Default for RevenueConfig {
    fn default() -> Self {
        Self {
            net_factor: default_net_factor(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.gipfellodge.com/JSON/".into()
}

fn default_timeout() -> u64 {
    30
}

fn default_net_factor() -> f64 {
    0.76
}
