//! Business Insight Service Provider Interface
//!
//! Defines the record types, derived tables, errors and traits shared by the
//! loader, the forecast producers and the dashboard.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{DataSource, Forecaster};
pub use error::{InsightError, Result};
pub use model::{
    CompetitorRecord, CustomerRecord, DataOrigin, Dataset, KpiSummary, Month, MonthlyAggregate,
    OverviewTotals, ProductRevenue, SalesRecord, SeasonalForecast, SeasonalForecastRow,
    SegmentSummary, TrendForecastRow,
};
