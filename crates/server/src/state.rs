//! Shared, read-only application state.

use insight_facade::{
    load_dataset, monthly_aggregate, AppConfig, Dataset, MonthlyAggregate, PersistedReports,
    ReportReader, Result,
};
use std::sync::Arc;

/// Application state shared across handlers.
///
/// Loaded once at startup and never invalidated; restart the server to pick
/// up a new batch run.
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    reports: Arc<PersistedReports>,
    config: Arc<AppConfig>,
    data_warning: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        dataset: Dataset,
        reports: PersistedReports,
        config: AppConfig,
        data_warning: Option<String>,
    ) -> Self {
        Self {
            dataset: Arc::new(dataset),
            reports: Arc::new(reports),
            config: Arc::new(config),
            data_warning: data_warning.map(Arc::from),
        }
    }

    /// Load the input tables and every persisted report table.
    ///
    /// Unreadable report tables are kept as [`insight_facade::Persisted::Invalid`]
    /// so the affected view can explain itself; only the input tables can
    /// fail startup.
    pub fn load(config: AppConfig) -> Result<Self> {
        let outcome = load_dataset(&config.data)?;
        let reports = ReportReader::new(&config.report.dir).read_all();
        tracing::info!(
            "Loaded {} sales records from {}; reports from {}",
            outcome.dataset.sales.len(),
            outcome.dataset.origin,
            config.report.dir.display()
        );
        Ok(Self::new(outcome.dataset, reports, config, outcome.warning))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn reports(&self) -> &PersistedReports {
        &self.reports
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn data_warning(&self) -> Option<&str> {
        self.data_warning.as_deref()
    }

    /// Monthly aggregate of the cached sales, recomputed per call.
    pub fn monthly(&self) -> Vec<MonthlyAggregate> {
        monthly_aggregate(&self.dataset.sales)
    }
}
