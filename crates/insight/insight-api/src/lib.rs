//! Business Insight Consumer API
//!
//! Configuration types and builders for the batch pipeline and the dashboard.

pub mod config;

pub use config::{
    AppConfig, AppConfigBuilder, DataConfig, DataSourceKind, ForecastConfig, ReportConfig,
    ServerConfig, DEFAULT_CONFIG_FILE, HORIZON_CHOICES, TREND_HORIZON,
};

// Re-export SPI types consumers need alongside configuration
pub use insight_spi::{InsightError, Result};
