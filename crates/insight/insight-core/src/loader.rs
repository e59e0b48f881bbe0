//! Input table loading.
//!
//! Two sources exist: CSV files in a directory and the embedded fixture.
//! Which one is used, and whether a missing file may fall back to the
//! fixture, is decided by [`DataConfig`] rather than at the call site.

use crate::fixture;
use insight_api::{DataConfig, DataSourceKind};
use insight_spi::{DataOrigin, DataSource, Dataset, InsightError, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

pub const SALES_FILE: &str = "sales.csv";
pub const CUSTOMERS_FILE: &str = "customers.csv";
pub const COMPETITORS_FILE: &str = "competitors.csv";

/// Parse a headed CSV table into typed rows.
pub fn parse_table<T, R>(reader: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize()
        .map(|row| row.map_err(InsightError::from))
        .collect()
}

/// Read a CSV table from disk. A missing file is reported as
/// [`InsightError::MissingInputFile`]; any other failure propagates as is.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(InsightError::MissingInputFile {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    parse_table(BufReader::new(file))
}

/// Loads `sales.csv`, `customers.csv` and `competitors.csv` from a directory.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DataSource for CsvDirectorySource {
    fn name(&self) -> &str {
        "csv-directory"
    }

    fn load(&self) -> Result<Dataset> {
        let sales = read_table(&self.dir.join(SALES_FILE))?;
        let customers = read_table(&self.dir.join(CUSTOMERS_FILE))?;
        let competitors = read_table(&self.dir.join(COMPETITORS_FILE))?;

        tracing::info!(
            "Loaded {} sales, {} customers, {} competitor rows from {}",
            sales.len(),
            customers.len(),
            competitors.len(),
            self.dir.display()
        );

        Ok(Dataset {
            sales,
            customers,
            competitors,
            origin: DataOrigin::Files(self.dir.clone()),
        })
    }
}

/// The small literal tables compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl DataSource for EmbeddedSource {
    fn name(&self) -> &str {
        "embedded"
    }

    fn load(&self) -> Result<Dataset> {
        Ok(Dataset {
            sales: parse_table(fixture::SALES_CSV.as_bytes())?,
            customers: parse_table(fixture::CUSTOMERS_CSV.as_bytes())?,
            competitors: parse_table(fixture::COMPETITORS_CSV.as_bytes())?,
            origin: DataOrigin::Embedded,
        })
    }
}

/// Source selected by configuration, without any fallback.
pub fn source_for(config: &DataConfig) -> Box<dyn DataSource> {
    match config.source {
        DataSourceKind::Files => Box::new(CsvDirectorySource::new(&config.dir)),
        DataSourceKind::Embedded => Box::new(EmbeddedSource),
    }
}

/// A loaded dataset plus the warning to show when the fixture stood in for
/// missing files.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub warning: Option<String>,
}

/// Load according to `config`, applying `fallback_to_embedded` when an
/// input file is missing.
pub fn load_dataset(config: &DataConfig) -> Result<LoadOutcome> {
    let source = source_for(config);
    match source.load() {
        Ok(dataset) => Ok(LoadOutcome {
            dataset,
            warning: None,
        }),
        Err(e) if e.is_missing_input() && config.fallback_to_embedded => {
            tracing::warn!("{}; falling back to embedded sample data", e);
            let dataset = EmbeddedSource.load()?;
            Ok(LoadOutcome {
                dataset,
                warning: Some(format!(
                    "{e}. Showing embedded sample data instead; place the input tables in {} to see real figures.",
                    config.dir.display()
                )),
            })
        }
        Err(e) => Err(e),
    }
}
