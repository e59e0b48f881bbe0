//! Report persistence
//!
//! The batch run writes three flat tables to a report directory and the
//! dashboard reads them back. Each write lands in a temporary file in the
//! same directory and is renamed over the previous table, so a reader sees
//! either the old or the new file, never a partial one.
//!
//! An unavailable seasonal forecast is stored as a one-row `{note, message}`
//! table. The reader turns that back into [`SeasonalForecast::Unavailable`];
//! nothing outside this module looks at column names.

use insight_spi::{InsightError, KpiSummary, Result, SeasonalForecast, SeasonalForecastRow, TrendForecastRow};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const KPI_FILE: &str = "summary_kpis.csv";
pub const TREND_FILE: &str = "trend_forecast.csv";
pub const SEASONAL_FILE: &str = "seasonal_forecast.csv";

/// `note` value of the placeholder table.
pub const UNAVAILABLE_NOTE: &str = "seasonal_model_unavailable";

#[derive(Debug, Serialize, Deserialize)]
struct Placeholder {
    note: String,
    message: String,
}

/// Fixed, well-known locations of the report tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    dir: PathBuf,
}

impl ReportPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn kpis(&self) -> PathBuf {
        self.dir.join(KPI_FILE)
    }

    pub fn trend(&self) -> PathBuf {
        self.dir.join(TREND_FILE)
    }

    pub fn seasonal(&self) -> PathBuf {
        self.dir.join(SEASONAL_FILE)
    }
}

/// Writes report tables, overwriting the previous run.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    paths: ReportPaths,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            paths: ReportPaths::new(dir),
        }
    }

    pub fn paths(&self) -> &ReportPaths {
        &self.paths
    }

    pub fn write_kpis(&self, kpis: &KpiSummary) -> Result<PathBuf> {
        let path = self.paths.kpis();
        write_rows(&path, std::slice::from_ref(kpis))?;
        Ok(path)
    }

    pub fn write_trend(&self, rows: &[TrendForecastRow]) -> Result<PathBuf> {
        let path = self.paths.trend();
        write_rows(&path, rows)?;
        Ok(path)
    }

    pub fn write_seasonal(&self, forecast: &SeasonalForecast) -> Result<PathBuf> {
        let path = self.paths.seasonal();
        match forecast {
            SeasonalForecast::Available { rows } => write_rows(&path, rows)?,
            SeasonalForecast::Unavailable { reason } => write_rows(
                &path,
                &[Placeholder {
                    note: UNAVAILABLE_NOTE.to_string(),
                    message: reason.clone(),
                }],
            )?,
        }
        Ok(path)
    }

    /// Remove a stale trend table. Returns whether one existed.
    pub fn clear_trend(&self) -> Result<bool> {
        match fs::remove_file(self.paths.trend()) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    tmp.as_file_mut().flush()?;
    tmp.persist(path).map_err(|e| InsightError::Io(e.error))?;

    tracing::debug!("Wrote {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Reads report tables written by [`ReportWriter`].
///
/// Every reader returns `Ok(None)` when the table has not been written yet.
#[derive(Debug, Clone)]
pub struct ReportReader {
    paths: ReportPaths,
}

impl ReportReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            paths: ReportPaths::new(dir),
        }
    }

    pub fn paths(&self) -> &ReportPaths {
        &self.paths
    }

    pub fn read_kpis(&self) -> Result<Option<KpiSummary>> {
        let path = self.paths.kpis();
        let Some(mut reader) = open(&path)? else {
            return Ok(None);
        };
        require_columns(&mut reader, KPI_FILE, &["total_customers", "latest_month_revenue"])?;
        let row = reader
            .deserialize::<KpiSummary>()
            .next()
            .ok_or_else(|| InsightError::SchemaMismatch {
                table: KPI_FILE.to_string(),
                reason: "no data row".to_string(),
            })??;
        Ok(Some(row))
    }

    pub fn read_trend(&self) -> Result<Option<Vec<TrendForecastRow>>> {
        let path = self.paths.trend();
        let Some(mut reader) = open(&path)? else {
            return Ok(None);
        };
        require_columns(&mut reader, TREND_FILE, &["month_index", "forecast_revenue"])?;
        collect_rows(reader).map(Some)
    }

    pub fn read_seasonal(&self) -> Result<Option<SeasonalForecast>> {
        let path = self.paths.seasonal();
        let Some(mut reader) = open(&path)? else {
            return Ok(None);
        };

        let headers = reader.headers()?.clone();
        let has = |name: &str| headers.iter().any(|h| h == name);

        if has("point_estimate") {
            require_columns(
                &mut reader,
                SEASONAL_FILE,
                &["date", "point_estimate", "lower_bound", "upper_bound", "month"],
            )?;
            let rows: Vec<SeasonalForecastRow> = collect_rows(reader)?;
            return Ok(Some(SeasonalForecast::Available { rows }));
        }

        if has("note") && has("message") {
            let placeholder: Option<Placeholder> = reader.deserialize().next().transpose()?;
            let reason = placeholder
                .map(|p| p.message)
                .unwrap_or_else(|| "seasonal forecast was not produced".to_string());
            return Ok(Some(SeasonalForecast::Unavailable { reason }));
        }

        Err(InsightError::SchemaMismatch {
            table: SEASONAL_FILE.to_string(),
            reason: format!(
                "expected forecast or placeholder columns, found [{}]",
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        })
    }

    /// Read every table, keeping per-table failures instead of stopping.
    pub fn read_all(&self) -> PersistedReports {
        PersistedReports {
            kpis: Persisted::from_result(self.read_kpis()),
            trend: Persisted::from_result(self.read_trend()),
            seasonal: Persisted::from_result(self.read_seasonal()),
        }
    }
}

fn open(path: &Path) -> Result<Option<csv::Reader<BufReader<File>>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(csv::Reader::from_reader(BufReader::new(file)))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn require_columns<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    table: &str,
    columns: &[&str],
) -> Result<()> {
    let headers = reader.headers()?;
    let missing: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(InsightError::SchemaMismatch {
            table: table.to_string(),
            reason: format!("missing column(s): {}", missing.join(", ")),
        })
    }
}

fn collect_rows<T: DeserializeOwned, R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<T>> {
    reader
        .deserialize()
        .map(|row| row.map_err(InsightError::from))
        .collect()
}

/// State of one persisted table as seen by a reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Persisted<T> {
    /// Not written yet
    Missing,
    Loaded(T),
    /// Present but unreadable (schema mismatch, parse error)
    Invalid(String),
}

impl<T> Persisted<T> {
    pub fn from_result(result: Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Persisted::Loaded(value),
            Ok(None) => Persisted::Missing,
            Err(e) => {
                tracing::warn!("Ignoring unreadable report table: {}", e);
                Persisted::Invalid(e.to_string())
            }
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Persisted::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// All report tables as of one read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistedReports {
    pub kpis: Persisted<KpiSummary>,
    pub trend: Persisted<Vec<TrendForecastRow>>,
    pub seasonal: Persisted<SeasonalForecast>,
}

impl PersistedReports {
    /// A seasonal forecast with rows, if one was persisted.
    pub fn seasonal_rows(&self) -> Option<&[SeasonalForecastRow]> {
        match self.seasonal.loaded() {
            Some(SeasonalForecast::Available { rows }) => Some(rows),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_spi::Month;

    fn seasonal_rows() -> Vec<SeasonalForecastRow> {
        let start = Month::new(2023, 11).unwrap();
        (0..4)
            .map(|i| {
                let month = start.offset(i);
                let point = 1000.0 / 3.0 + i as f64 * 0.1;
                SeasonalForecastRow {
                    date: month.first_day(),
                    point_estimate: point,
                    lower_bound: point - 12.345678901234,
                    upper_bound: point + 12.345678901234,
                    month,
                }
            })
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_missing_tables_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let reader = ReportReader::new(dir.path());
        assert!(reader.read_kpis().unwrap().is_none());
        assert!(reader.read_trend().unwrap().is_none());
        assert!(reader.read_seasonal().unwrap().is_none());

        let all = reader.read_all();
        assert_eq!(all.kpis, Persisted::Missing);
        assert!(all.seasonal_rows().is_none());
    }

    #[test]
    fn test_kpi_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let kpis = KpiSummary {
            total_customers: 42,
            churn_rate: 0.125,
            avg_clv: 1234.5678,
            latest_month_revenue: 98765.4321,
            latest_month_profit: 1.0 / 7.0,
        };
        ReportWriter::new(dir.path()).write_kpis(&kpis).unwrap();
        let back = ReportReader::new(dir.path()).read_kpis().unwrap().unwrap();
        assert_eq!(back.total_customers, 42);
        assert!(close(back.latest_month_profit, kpis.latest_month_profit));
        assert!(close(back.avg_clv, kpis.avg_clv));
    }

    #[test]
    fn test_trend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![
            TrendForecastRow { month_index: 5, forecast_revenue: 1.0 / 3.0 },
            TrendForecastRow { month_index: 6, forecast_revenue: 2.0e7 / 7.0 },
            TrendForecastRow { month_index: 7, forecast_revenue: -0.5 },
        ];
        ReportWriter::new(dir.path()).write_trend(&rows).unwrap();
        let back = ReportReader::new(dir.path()).read_trend().unwrap().unwrap();
        assert_eq!(back.len(), 3);
        for (a, b) in rows.iter().zip(back.iter()) {
            assert_eq!(a.month_index, b.month_index);
            assert!(close(a.forecast_revenue, b.forecast_revenue));
        }
    }

    #[test]
    fn test_seasonal_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let rows = seasonal_rows();
        ReportWriter::new(dir.path())
            .write_seasonal(&SeasonalForecast::Available { rows: rows.clone() })
            .unwrap();

        let back = ReportReader::new(dir.path()).read_seasonal().unwrap().unwrap();
        let back_rows = back.rows();
        assert_eq!(back_rows.len(), rows.len());
        for (a, b) in rows.iter().zip(back_rows.iter()) {
            assert_eq!(a.date, b.date);
            assert_eq!(a.month, b.month);
            assert!(close(a.point_estimate, b.point_estimate));
            assert!(close(a.lower_bound, b.lower_bound));
            assert!(close(a.upper_bound, b.upper_bound));
        }
    }

    #[test]
    fn test_placeholder_written_for_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let path = writer
            .write_seasonal(&SeasonalForecast::unavailable("not compiled in"))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("note,message"));
        assert_eq!(lines.next(), Some("seasonal_model_unavailable,not compiled in"));
        assert!(!content.contains("point_estimate"));

        let back = ReportReader::new(dir.path()).read_seasonal().unwrap().unwrap();
        assert_eq!(back, SeasonalForecast::unavailable("not compiled in"));
    }

    #[test]
    fn test_overwrite_replaces_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        writer
            .write_seasonal(&SeasonalForecast::Available { rows: seasonal_rows() })
            .unwrap();
        writer
            .write_seasonal(&SeasonalForecast::unavailable("disabled"))
            .unwrap();

        let back = ReportReader::new(dir.path()).read_seasonal().unwrap().unwrap();
        assert!(!back.is_available());
    }

    #[test]
    fn test_unknown_seasonal_schema() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SEASONAL_FILE), "ds,value\n2024-01-01,3\n").unwrap();

        let result = ReportReader::new(dir.path()).read_seasonal();
        assert!(matches!(result, Err(InsightError::SchemaMismatch { .. })));

        let all = ReportReader::new(dir.path()).read_all();
        assert!(matches!(all.seasonal, Persisted::Invalid(_)));
    }

    #[test]
    fn test_trend_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TREND_FILE), "month_index\n3\n").unwrap();
        let result = ReportReader::new(dir.path()).read_trend();
        assert!(matches!(result, Err(InsightError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_clear_trend() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        assert!(!writer.clear_trend().unwrap());
        writer
            .write_trend(&[TrendForecastRow { month_index: 2, forecast_revenue: 1.0 }])
            .unwrap();
        assert!(writer.clear_trend().unwrap());
        assert!(ReportReader::new(dir.path()).read_trend().unwrap().is_none());
    }

    #[test]
    fn test_creates_report_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("report");
        let path = ReportWriter::new(&nested)
            .write_trend(&[TrendForecastRow { month_index: 1, forecast_revenue: 2.0 }])
            .unwrap();
        assert!(path.exists());
    }
}
