//! Dashboard breakdowns: headline totals, revenue by product, customer segments.

use crate::kpi::customer_rates;
use insight_spi::{CustomerRecord, OverviewTotals, ProductRevenue, SalesRecord, SegmentSummary};
use std::collections::BTreeMap;

pub fn overview_totals(sales: &[SalesRecord], customers: &[CustomerRecord]) -> OverviewTotals {
    let (churn_rate, avg_clv) = customer_rates(customers);
    OverviewTotals {
        total_revenue: sales.iter().map(|s| s.revenue).sum(),
        total_profit: sales.iter().map(|s| s.profit).sum(),
        avg_clv,
        churn_rate,
    }
}

/// Revenue per product, highest first (ties broken by product name).
pub fn product_revenue(sales: &[SalesRecord]) -> Vec<ProductRevenue> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in sales {
        *totals.entry(record.product.as_str()).or_insert(0.0) += record.revenue;
    }

    let mut products: Vec<ProductRevenue> = totals
        .into_iter()
        .map(|(product, revenue)| ProductRevenue {
            product: product.to_string(),
            revenue,
        })
        .collect();
    // BTreeMap order already sorts by name; a stable sort keeps it for ties
    products.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    products
}

/// Customer count, mean CLV and churn rate per segment, by segment name.
pub fn segment_summary(customers: &[CustomerRecord]) -> Vec<SegmentSummary> {
    let mut groups: BTreeMap<&str, Vec<&CustomerRecord>> = BTreeMap::new();
    for customer in customers {
        groups.entry(customer.segment.as_str()).or_default().push(customer);
    }

    groups
        .into_iter()
        .map(|(segment, members)| {
            let n = members.len() as f64;
            SegmentSummary {
                segment: segment.to_string(),
                customers: members.len(),
                avg_clv: members.iter().map(|c| c.clv).sum::<f64>() / n,
                churn_rate: members.iter().filter(|c| c.churn_flag).count() as f64 / n,
            }
        })
        .collect()
}
