//! Derived tables: monthly aggregates, KPI snapshot and dashboard breakdowns.

use super::Month;
use serde::{Deserialize, Serialize};

/// Sales reduced to one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub month: Month,
    pub revenue: f64,
    pub profit: f64,
    pub quantity: u64,
    /// `profit / revenue`; NaN when revenue is zero
    pub profit_margin: f64,
    /// Fractional change from the previous month; exactly 0 for the first
    pub revenue_growth: f64,
}

/// Single-row KPI snapshot, overwritten on every batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_customers: usize,
    pub churn_rate: f64,
    pub avg_clv: f64,
    pub latest_month_revenue: f64,
    pub latest_month_profit: f64,
}

/// Headline numbers for the dashboard overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewTotals {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub avg_clv: f64,
    pub churn_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRevenue {
    pub product: String,
    pub revenue: f64,
}

/// Per-segment customer statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSummary {
    pub segment: String,
    pub customers: usize,
    pub avg_clv: f64,
    pub churn_rate: f64,
}
