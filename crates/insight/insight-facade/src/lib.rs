//! Business Insight Facade
//!
//! Unified re-exports for the insight stack:
//! - `insight_spi` - records, derived tables, errors and contracts
//! - `insight_api` - configuration types and builders
//! - `insight_core` - loader, aggregator, forecasters, report persistence
//!
//! # Example
//!
//! ```rust,ignore
//! use insight_facade::{run_analysis, AppConfig};
//!
//! let config = AppConfig::load_or_default(None)?;
//! let report = run_analysis(&config, &mut |line| println!("{line}"))?;
//! println!("{} months analysed", report.months);
//! ```

// Re-export everything from SPI
pub use insight_spi::*;

// Re-export everything from API
pub use insight_api::*;

// Re-export core modules for direct access
pub use insight_core::{
    aggregate, breakdown, confidence, fixture, kpi, loader, pipeline, report, seasonal, trend,
};

// Re-export main core types at root
pub use insight_core::{
    analyze_dataset, kpi_summary, load_dataset, monthly_aggregate, run_analysis, AnalysisReport,
    CsvDirectorySource, EmbeddedSource, LinearTrend, LoadOutcome, Persisted, PersistedReports,
    ReportPaths, ReportReader, ReportWriter, SeasonalForecaster, TrendForecaster,
    SEASONAL_COMPILED,
};
