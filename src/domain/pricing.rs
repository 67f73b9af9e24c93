//! Seasonal pricing records, one JSON dataset per calendar year.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::format_eur;

/// One day of seasonal pricing. The serde aliases accept the Dutch field
/// names the published datasets use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingRecord {
    #[serde(alias = "datum")]
    pub date: NaiveDate,
    #[serde(default, alias = "seizoen")]
    pub season: Option<String>,
    #[serde(default, alias = "min_nachten", alias = "minNights")]
    pub min_nights: Option<u32>,
    #[serde(default, alias = "dagprijs", alias = "dayPrice")]
    pub day_price: Option<f64>,
    #[serde(default, alias = "weekprijs", alias = "weekPrice")]
    pub week_price: Option<f64>,
}

impl PricingRecord {
    /// Key under which the record is cached and looked up.
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl std::fmt::Display for PricingRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let day = self.day_price.map_or_else(|| "—".to_string(), format_eur);
        let week = self.week_price.map_or_else(|| "—".to_string(), format_eur);
        write!(f, "Day: {day} · Week: {week}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_dutch_field_names() {
        let json = r#"{
            "datum": "2026-07-04",
            "seizoen": "hoogseizoen",
            "min_nachten": 7,
            "dagprijs": 185.0,
            "weekprijs": 1150.0
        }"#;
        let record: PricingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.iso_date(), "2026-07-04");
        assert_eq!(record.season.as_deref(), Some("hoogseizoen"));
        assert_eq!(record.min_nights, Some(7));
        assert_eq!(record.day_price, Some(185.0));
        assert_eq!(record.week_price, Some(1150.0));
    }

    #[test]
    fn deserializes_english_field_names() {
        let json = r#"{"date": "2026-01-10", "day_price": 95.0}"#;
        let record: PricingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.iso_date(), "2026-01-10");
        assert_eq!(record.day_price, Some(95.0));
        assert!(record.week_price.is_none());
        assert!(record.season.is_none());
    }

    #[test]
    fn display_with_and_without_prices() {
        let record = PricingRecord {
            date: NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
            season: None,
            min_nights: None,
            day_price: Some(185.0),
            week_price: None,
        };
        let s = record.to_string();
        assert!(s.contains("€ 185,00"));
        assert!(s.contains('—'));
    }
}
