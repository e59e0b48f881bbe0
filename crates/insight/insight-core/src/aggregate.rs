//! Monthly aggregation of sales records.

use insight_spi::{Month, MonthlyAggregate, SalesRecord};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Bucket {
    revenue: f64,
    profit: f64,
    quantity: u64,
}

/// Reduce sales to one row per calendar month, in chronological order.
///
/// `profit_margin` is `profit / revenue` and is NaN for a zero-revenue
/// month. `revenue_growth` is the fractional change from the preceding
/// row; the first row's growth is exactly 0.
pub fn monthly_aggregate(sales: &[SalesRecord]) -> Vec<MonthlyAggregate> {
    let mut buckets: BTreeMap<Month, Bucket> = BTreeMap::new();
    for record in sales {
        let bucket = buckets.entry(Month::from_date(record.date)).or_default();
        bucket.revenue += record.revenue;
        bucket.profit += record.profit;
        bucket.quantity += record.quantity;
    }

    let mut previous_revenue: Option<f64> = None;
    buckets
        .into_iter()
        .map(|(month, bucket)| {
            let revenue_growth = match previous_revenue {
                Some(prev) => (bucket.revenue - prev) / prev,
                None => 0.0,
            };
            previous_revenue = Some(bucket.revenue);

            MonthlyAggregate {
                month,
                revenue: bucket.revenue,
                profit: bucket.profit,
                quantity: bucket.quantity,
                profit_margin: bucket.profit / bucket.revenue,
                revenue_growth,
            }
        })
        .collect()
}

/// Revenue column of the aggregate.
pub fn revenue_series(monthly: &[MonthlyAggregate]) -> Vec<f64> {
    monthly.iter().map(|m| m.revenue).collect()
}
