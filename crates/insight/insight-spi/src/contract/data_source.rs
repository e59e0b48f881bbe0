//! Data source trait definition.

use crate::error::Result;
use crate::model::Dataset;

/// Trait for sources that can produce the three input tables.
pub trait DataSource: Send + Sync {
    /// Data source name.
    fn name(&self) -> &str;

    /// Load sales, customers and competitors.
    fn load(&self) -> Result<Dataset>;
}
