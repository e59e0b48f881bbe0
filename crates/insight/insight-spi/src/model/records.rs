//! Input table rows.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One sales observation (transaction or product-per-day row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(deserialize_with = "de_date")]
    pub date: NaiveDate,
    pub product: String,
    pub revenue: f64,
    pub profit: f64,
    pub quantity: u64,
}

impl SalesRecord {
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        revenue: f64,
        profit: f64,
        quantity: u64,
    ) -> Self {
        Self {
            date,
            product: product.into(),
            revenue,
            profit,
            quantity,
        }
    }
}

/// One customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub segment: String,
    /// Customer lifetime value
    pub clv: f64,
    #[serde(deserialize_with = "de_flag")]
    pub churn_flag: bool,
    #[serde(deserialize_with = "de_date")]
    pub join_date: NaiveDate,
}

/// Competitor figures. Loaded with the other tables but not aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    #[serde(deserialize_with = "de_date")]
    pub date: NaiveDate,
    pub competitor_sales: f64,
}

/// Where a [`Dataset`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "dir", rename_all = "snake_case")]
pub enum DataOrigin {
    Files(PathBuf),
    Embedded,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::Files(dir) => write!(f, "files in {}", dir.display()),
            DataOrigin::Embedded => write!(f, "embedded sample data"),
        }
    }
}

/// The three input tables, as loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub sales: Vec<SalesRecord>,
    pub customers: Vec<CustomerRecord>,
    pub competitors: Vec<CompetitorRecord>,
    pub origin: DataOrigin,
}

impl Dataset {
    pub fn is_embedded(&self) -> bool {
        self.origin == DataOrigin::Embedded
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn de_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    let day_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{raw}': {e}")))
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "yes" | "y" => Ok(true),
        "0" | "0.0" | "false" | "no" | "n" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid churn flag '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_record_from_json() {
        let json = r#"{"date":"2023-01-15","product":"Widget","revenue":100.5,"profit":20.0,"quantity":3}"#;
        let record: SalesRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        assert_eq!(record.product, "Widget");
        assert_eq!(record.quantity, 3);
    }

    #[test]
    fn test_date_with_time_part() {
        let json = r#"{"date":"2023-03-01 00:00:00","competitor_sales":5.0}"#;
        let record: CompetitorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
    }

    #[test]
    fn test_churn_flag_variants() {
        for (raw, expected) in [("1", true), ("0", false), ("True", true), ("no", false)] {
            let json = format!(
                r#"{{"customer_id":"C1","segment":"SMB","clv":10.0,"churn_flag":"{raw}","join_date":"2022-05-01"}}"#
            );
            let record: CustomerRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(record.churn_flag, expected, "flag {raw}");
        }
    }

    #[test]
    fn test_bad_churn_flag_rejected() {
        let json = r#"{"customer_id":"C1","segment":"SMB","clv":10.0,"churn_flag":"maybe","join_date":"2022-05-01"}"#;
        assert!(serde_json::from_str::<CustomerRecord>(json).is_err());
    }

    #[test]
    fn test_data_origin_display() {
        assert_eq!(DataOrigin::Embedded.to_string(), "embedded sample data");
        assert_eq!(
            DataOrigin::Files(PathBuf::from("data")).to_string(),
            "files in data"
        );
    }
}
