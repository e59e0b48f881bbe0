//! Model types for records, derived tables and forecasts

mod forecast;
mod month;
mod records;
mod summary;

pub use forecast::{SeasonalForecast, SeasonalForecastRow, TrendForecastRow};
pub use month::Month;
pub use records::{CompetitorRecord, CustomerRecord, DataOrigin, Dataset, SalesRecord};
pub use summary::{KpiSummary, MonthlyAggregate, OverviewTotals, ProductRevenue, SegmentSummary};
