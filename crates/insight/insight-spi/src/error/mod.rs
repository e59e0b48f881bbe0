//! Error module containing error types and result aliases

mod insight_error;

pub use insight_error::InsightError;

/// Result type for insight operations
pub type Result<T> = std::result::Result<T, InsightError>;
