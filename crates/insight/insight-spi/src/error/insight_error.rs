//! Insight error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, aggregating, forecasting or reporting
#[derive(Error, Debug)]
pub enum InsightError {
    /// A required input table does not exist
    #[error("Input file not found: {}", path.display())]
    MissingInputFile { path: PathBuf },

    /// Too few observations for a meaningful regression
    #[error("Degenerate fit: need at least {required} months, got {actual}")]
    DegenerateFit { required: usize, actual: usize },

    /// A persisted table does not have the expected columns
    #[error("Schema mismatch in {table}: {reason}")]
    SchemaMismatch { table: String, reason: String },

    /// Nothing to summarize
    #[error("No data: {0}")]
    NoData(String),

    /// Date or month field could not be parsed
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dashboard server failed to bind or serve
    #[error("Server error: {0}")]
    Serve(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InsightError {
    /// Whether this error is the "input file is absent" case that the
    /// loader may recover from by switching to the embedded fixture.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, InsightError::MissingInputFile { .. })
    }
}
