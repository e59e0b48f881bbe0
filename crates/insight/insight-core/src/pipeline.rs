//! Batch analysis run: load, aggregate, forecast, persist.

use crate::aggregate::monthly_aggregate;
use crate::kpi::kpi_summary;
use crate::loader::source_for;
use crate::report::ReportWriter;
use crate::seasonal::SeasonalForecaster;
use crate::trend::TrendForecaster;
use insight_api::AppConfig;
use insight_spi::{
    Dataset, Forecaster, InsightError, KpiSummary, Month, Result, SeasonalForecast,
    TrendForecastRow,
};
use serde::Serialize;
use std::path::PathBuf;

/// What a batch run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub sales_records: usize,
    pub months: usize,
    pub first_month: Option<Month>,
    pub last_month: Option<Month>,
    pub kpis: KpiSummary,
    /// `None` when the history was too short for a trend fit
    pub trend: Option<Vec<TrendForecastRow>>,
    pub seasonal: SeasonalForecast,
    pub written: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Run the batch pipeline as configured.
///
/// Input files are read without the embedded fallback: a missing input is
/// an error here. `progress` receives one human-readable line per stage.
pub fn run_analysis(config: &AppConfig, progress: &mut dyn FnMut(&str)) -> Result<AnalysisReport> {
    let dataset = source_for(&config.data).load()?;
    progress(&format!(
        "Loaded {} sales, {} customer and {} competitor records ({})",
        dataset.sales.len(),
        dataset.customers.len(),
        dataset.competitors.len(),
        dataset.origin
    ));
    analyze_dataset(&dataset, config, progress)
}

/// Run aggregation, forecasting and persistence on an already loaded dataset.
pub fn analyze_dataset(
    dataset: &Dataset,
    config: &AppConfig,
    progress: &mut dyn FnMut(&str),
) -> Result<AnalysisReport> {
    let writer = ReportWriter::new(&config.report.dir);
    let mut written = Vec::new();
    let mut warnings = Vec::new();

    let monthly = monthly_aggregate(&dataset.sales);
    let first_month = monthly.first().map(|m| m.month);
    let last_month = monthly.last().map(|m| m.month);
    match (first_month, last_month) {
        (Some(first), Some(last)) => progress(&format!(
            "Aggregated {} month(s) from {} to {}",
            monthly.len(),
            first,
            last
        )),
        _ => progress("Aggregated 0 months"),
    }

    let kpis = kpi_summary(&dataset.customers, &monthly)?;
    written.push(writer.write_kpis(&kpis)?);
    progress(&format!("KPI summary saved to {}", writer.paths().kpis().display()));

    let trend_forecaster = TrendForecaster::new();
    let trend = match trend_forecaster.forecast(&monthly) {
        Ok(rows) => {
            written.push(writer.write_trend(&rows)?);
            progress(&format!(
                "Trend forecast ({} months) saved to {}",
                rows.len(),
                writer.paths().trend().display()
            ));
            Some(rows)
        }
        Err(e @ InsightError::DegenerateFit { .. }) => {
            let removed = writer.clear_trend()?;
            let warning = format!(
                "Trend forecast skipped: {e}{}",
                if removed { "; removed the previous trend table" } else { "" }
            );
            tracing::warn!("{}", warning);
            progress(&format!("WARNING: {warning}"));
            warnings.push(warning);
            None
        }
        Err(e) => return Err(e),
    };

    let seasonal_forecaster = SeasonalForecaster::from_config(&config.forecast);
    let seasonal = seasonal_forecaster.forecast(&monthly)?;
    written.push(writer.write_seasonal(&seasonal)?);
    match &seasonal {
        SeasonalForecast::Available { rows } => progress(&format!(
            "Seasonal forecast ({} rows, {} months ahead) saved to {}",
            rows.len(),
            seasonal_forecaster.horizon(),
            writer.paths().seasonal().display()
        )),
        SeasonalForecast::Unavailable { reason } => {
            let warning = format!("Seasonal forecast unavailable: {reason}");
            tracing::warn!("{}", warning);
            progress(&format!(
                "{warning}. A placeholder was saved to {}",
                writer.paths().seasonal().display()
            ));
            warnings.push(warning);
        }
    }

    Ok(AnalysisReport {
        sales_records: dataset.sales.len(),
        months: monthly.len(),
        first_month,
        last_month,
        kpis,
        trend,
        seasonal,
        written,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::EmbeddedSource;
    use insight_api::AppConfigBuilder;
    use insight_spi::DataSource;

    #[test]
    fn test_analyze_embedded_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfigBuilder::new().report_dir(dir.path()).build().unwrap();
        let dataset = EmbeddedSource.load().unwrap();

        let mut lines = Vec::new();
        let report = analyze_dataset(&dataset, &config, &mut |line: &str| lines.push(line.to_string())).unwrap();

        assert_eq!(report.months, 3);
        assert_eq!(report.trend.as_ref().map(Vec::len), Some(3));
        assert_eq!(report.written.len(), 3);
        assert!(lines.iter().any(|l| l.starts_with("KPI summary saved")));
    }

    #[test]
    fn test_missing_inputs_fail_loudly() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let config = AppConfigBuilder::new()
            .data_dir(data.path())
            .report_dir(out.path())
            .fallback_to_embedded(true)
            .build()
            .unwrap();

        let result = run_analysis(&config, &mut |_: &str| {});
        assert!(matches!(result, Err(InsightError::MissingInputFile { .. })));
    }
}
