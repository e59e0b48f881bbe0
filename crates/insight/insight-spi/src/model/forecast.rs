//! Forecast output rows.

use super::Month;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One step of the trend-line forecast.
///
/// `month_index` continues the 0-based index of the historical months, so
/// the first forecast row of an N-month history has index N.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendForecastRow {
    pub month_index: usize,
    pub forecast_revenue: f64,
}

impl TrendForecastRow {
    /// Calendar month this row forecasts, given the last observed month and
    /// the number of historical months the index was counted over.
    pub fn month_for(&self, last_observed: Month, history_len: usize) -> Month {
        last_observed.offset(self.month_index as i64 - history_len as i64 + 1)
    }
}

/// One row of the seasonal model output (fitted history or future step).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalForecastRow {
    pub date: NaiveDate,
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub month: Month,
}

/// Result of the seasonal producer.
///
/// Consumers match on the variant; the on-disk placeholder table is only a
/// file encoding of [`SeasonalForecast::Unavailable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeasonalForecast {
    Available { rows: Vec<SeasonalForecastRow> },
    Unavailable { reason: String },
}

impl SeasonalForecast {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        SeasonalForecast::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, SeasonalForecast::Available { .. })
    }

    /// All rows; empty when unavailable.
    pub fn rows(&self) -> &[SeasonalForecastRow] {
        match self {
            SeasonalForecast::Available { rows } => rows,
            SeasonalForecast::Unavailable { .. } => &[],
        }
    }

    /// Rows strictly after `last_observed`, i.e. the forecast horizon.
    pub fn future_rows(&self, last_observed: Month) -> Vec<SeasonalForecastRow> {
        self.rows()
            .iter()
            .filter(|row| row.month > last_observed)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: Month, value: f64) -> SeasonalForecastRow {
        SeasonalForecastRow {
            date: month.first_day(),
            point_estimate: value,
            lower_bound: value - 1.0,
            upper_bound: value + 1.0,
            month,
        }
    }

    #[test]
    fn test_trend_row_month_for() {
        let last = Month::new(2023, 12).unwrap();
        let first = TrendForecastRow {
            month_index: 12,
            forecast_revenue: 1.0,
        };
        let third = TrendForecastRow {
            month_index: 14,
            forecast_revenue: 1.0,
        };
        assert_eq!(first.month_for(last, 12), Month::new(2024, 1).unwrap());
        assert_eq!(third.month_for(last, 12), Month::new(2024, 3).unwrap());
    }

    #[test]
    fn test_future_rows_split() {
        let jan = Month::new(2024, 1).unwrap();
        let forecast = SeasonalForecast::Available {
            rows: vec![row(jan, 1.0), row(jan.succ(), 2.0), row(jan.offset(2), 3.0)],
        };
        let future = forecast.future_rows(jan);
        assert_eq!(future.len(), 2);
        assert_eq!(future[0].month, jan.succ());
    }

    #[test]
    fn test_unavailable_has_no_rows() {
        let forecast = SeasonalForecast::unavailable("not compiled in");
        assert!(!forecast.is_available());
        assert!(forecast.rows().is_empty());
        assert!(forecast.future_rows(Month::new(2024, 1).unwrap()).is_empty());
    }

    #[test]
    fn test_tagged_json() {
        let forecast = SeasonalForecast::unavailable("disabled");
        let json = serde_json::to_value(&forecast).unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["reason"], "disabled");
    }
}
