//! Contracts implemented by the core crate

mod data_source;
mod forecaster;

pub use data_source::DataSource;
pub use forecaster::Forecaster;
