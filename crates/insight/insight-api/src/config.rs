//! Application configuration types.
//!
//! Every field has a serde default, so an absent or partial `insight.toml`
//! still yields a usable configuration.

use insight_spi::{InsightError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Trend-line forecast horizon in months. Not configurable.
pub const TREND_HORIZON: usize = 3;

/// Horizons offered by the dashboard selector.
pub const HORIZON_CHOICES: [usize; 3] = [3, 6, 12];

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "insight.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Which loader backs the input tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceKind {
    /// CSV files in `data.dir`
    #[default]
    Files,
    /// Literal tables compiled into the binary
    Embedded,
}

/// Input table settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding `sales.csv`, `customers.csv`, `competitors.csv`.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub source: DataSourceKind,

    /// Substitute the embedded tables when an input file is missing.
    #[serde(default)]
    pub fallback_to_embedded: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            source: DataSourceKind::default(),
            fallback_to_embedded: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Output table settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_dir")]
    pub dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: default_report_dir(),
        }
    }
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("report")
}

/// Forecast producer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Months the seasonal model extends past the last observed month.
    #[serde(default = "default_seasonal_horizon")]
    pub seasonal_horizon: usize,

    /// Season length in months.
    #[serde(default = "default_seasonal_period")]
    pub seasonal_period: usize,

    /// Coverage of the seasonal uncertainty band (e.g. 0.8 for 80%).
    #[serde(default = "default_interval_level")]
    pub interval_level: f64,

    /// Turn the seasonal producer off at runtime.
    #[serde(default = "default_true")]
    pub seasonal_enabled: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            seasonal_horizon: default_seasonal_horizon(),
            seasonal_period: default_seasonal_period(),
            interval_level: default_interval_level(),
            seasonal_enabled: true,
        }
    }
}

impl ForecastConfig {
    /// Fixed horizon of the trend-line producer.
    pub fn trend_horizon(&self) -> usize {
        TREND_HORIZON
    }
}

fn default_seasonal_horizon() -> usize {
    6
}

fn default_seasonal_period() -> usize {
    12
}

fn default_interval_level() -> f64 {
    0.8
}

fn default_true() -> bool {
    true
}

/// Dashboard server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| InsightError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            InsightError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, else from `insight.toml` in the working
    /// directory if present, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.forecast.seasonal_period < 2 {
            return Err(InsightError::InvalidParameter {
                name: "forecast.seasonal_period".to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        if self.forecast.seasonal_horizon == 0 {
            return Err(InsightError::InvalidParameter {
                name: "forecast.seasonal_horizon".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let level = self.forecast.interval_level;
        if !(0.0 < level && level < 1.0) {
            return Err(InsightError::InvalidParameter {
                name: "forecast.interval_level".to_string(),
                reason: "must be between 0 and 1 (exclusive)".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for AppConfig.
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Create a new builder starting from defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data.dir = dir.into();
        self
    }

    pub fn data_source(mut self, source: DataSourceKind) -> Self {
        self.config.data.source = source;
        self
    }

    pub fn fallback_to_embedded(mut self, fallback: bool) -> Self {
        self.config.data.fallback_to_embedded = fallback;
        self
    }

    pub fn report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.report.dir = dir.into();
        self
    }

    pub fn seasonal_horizon(mut self, horizon: usize) -> Self {
        self.config.forecast.seasonal_horizon = horizon;
        self
    }

    pub fn seasonal_period(mut self, period: usize) -> Self {
        self.config.forecast.seasonal_period = period;
        self
    }

    pub fn interval_level(mut self, level: f64) -> Self {
        self.config.forecast.interval_level = level;
        self
    }

    pub fn seasonal_enabled(mut self, enabled: bool) -> Self {
        self.config.forecast.seasonal_enabled = enabled;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<AppConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.data.source, DataSourceKind::Files);
        assert!(!config.data.fallback_to_embedded);
        assert_eq!(config.report.dir, PathBuf::from("report"));
        assert_eq!(config.forecast.seasonal_horizon, 6);
        assert_eq!(config.forecast.seasonal_period, 12);
        assert_eq!(config.forecast.trend_horizon(), 3);
        assert!(config.forecast.seasonal_enabled);
        assert_eq!(config.server.port, 8501);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [data]
            dir = "/srv/insight/data"
            source = "embedded"

            [forecast]
            seasonal_horizon = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.data.dir, PathBuf::from("/srv/insight/data"));
        assert_eq!(config.data.source, DataSourceKind::Embedded);
        assert_eq!(config.forecast.seasonal_horizon, 12);
        assert_eq!(config.forecast.seasonal_period, 12);
        assert_eq!(config.report.dir, PathBuf::from("report"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = AppConfig::from_toml_str("[data\ndir = 1");
        assert!(matches!(result, Err(InsightError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_bad_interval() {
        let result = AppConfig::from_toml_str("[forecast]\ninterval_level = 1.5\n");
        assert!(matches!(
            result,
            Err(InsightError::InvalidParameter { ref name, .. }) if name == "forecast.interval_level"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_missing_file() {
        let result = AppConfig::load(Path::new("/nonexistent/insight.toml"));
        assert!(matches!(result, Err(InsightError::Config(_))));
    }

    #[test]
    fn test_builder_success() {
        let config = AppConfigBuilder::new()
            .data_dir("in")
            .report_dir("out")
            .fallback_to_embedded(true)
            .seasonal_horizon(3)
            .port(8080)
            .build()
            .unwrap();

        assert_eq!(config.data.dir, PathBuf::from("in"));
        assert_eq!(config.report.dir, PathBuf::from("out"));
        assert!(config.data.fallback_to_embedded);
        assert_eq!(config.forecast.seasonal_horizon, 3);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_builder_rejects_short_period() {
        let result = AppConfigBuilder::new().seasonal_period(1).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_zero_horizon() {
        let result = AppConfigBuilder::new().seasonal_horizon(0).build();
        assert!(result.is_err());
    }
}
