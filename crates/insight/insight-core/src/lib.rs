//! # insight-core
//!
//! Implementations behind the business insight pipeline:
//!
//! - **loader** - CSV directory and embedded sample sources
//! - **aggregate** - calendar-month reduction of sales
//! - **kpi** / **breakdown** - KPI snapshot and dashboard breakdowns
//! - **trend** - OLS trend line, fixed 3-month horizon
//! - **seasonal** - additive trend + seasonality with uncertainty bands
//! - **report** - CSV persistence of KPI and forecast tables
//! - **pipeline** - the sequential batch run
//!
//! ## Example
//!
//! ```rust
//! use insight_core::prelude::*;
//!
//! let dataset = EmbeddedSource.load().unwrap();
//! let monthly = monthly_aggregate(&dataset.sales);
//! let rows = TrendForecaster::new().forecast(&monthly).unwrap();
//! assert_eq!(rows.len(), 3);
//! ```

pub mod aggregate;
pub mod breakdown;
pub mod confidence;
pub mod fixture;
pub mod kpi;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod seasonal;
pub mod trend;

// Re-export SPI types for implementations
pub use insight_spi::{
    DataSource, Dataset, Forecaster, InsightError, KpiSummary, Month, MonthlyAggregate, Result,
    SeasonalForecast, SeasonalForecastRow, TrendForecastRow,
};

// Re-export main types
pub use aggregate::monthly_aggregate;
pub use kpi::kpi_summary;
pub use loader::{load_dataset, CsvDirectorySource, EmbeddedSource, LoadOutcome};
pub use pipeline::{analyze_dataset, run_analysis, AnalysisReport};
pub use report::{Persisted, PersistedReports, ReportPaths, ReportReader, ReportWriter};
pub use seasonal::{SeasonalForecaster, SEASONAL_COMPILED};
pub use trend::{LinearTrend, TrendForecaster};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregate::monthly_aggregate;
    pub use crate::breakdown::{overview_totals, product_revenue, segment_summary};
    pub use crate::kpi::kpi_summary;
    pub use crate::loader::{load_dataset, CsvDirectorySource, EmbeddedSource};
    pub use crate::pipeline::run_analysis;
    pub use crate::report::{ReportReader, ReportWriter};
    pub use crate::seasonal::SeasonalForecaster;
    pub use crate::trend::TrendForecaster;
    pub use insight_spi::{DataSource, Forecaster, InsightError, Result};
}
