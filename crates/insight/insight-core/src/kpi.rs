//! KPI snapshot.

use insight_spi::{CustomerRecord, InsightError, KpiSummary, MonthlyAggregate, Result};

/// Churn rate and mean CLV over all customers.
///
/// With no customers both are reported as 0 rather than NaN.
pub fn customer_rates(customers: &[CustomerRecord]) -> (f64, f64) {
    if customers.is_empty() {
        tracing::warn!("Customer table is empty; churn rate and average CLV reported as 0");
        return (0.0, 0.0);
    }

    let n = customers.len() as f64;
    let churned = customers.iter().filter(|c| c.churn_flag).count() as f64;
    let clv_sum: f64 = customers.iter().map(|c| c.clv).sum();
    (churned / n, clv_sum / n)
}

/// Build the KPI row from customers and the monthly aggregate.
///
/// Fails with [`InsightError::NoData`] when there is no month to report.
pub fn kpi_summary(customers: &[CustomerRecord], monthly: &[MonthlyAggregate]) -> Result<KpiSummary> {
    let latest = monthly.last().ok_or_else(|| {
        InsightError::NoData("sales table is empty; no month to report".to_string())
    })?;
    let (churn_rate, avg_clv) = customer_rates(customers);

    Ok(KpiSummary {
        total_customers: customers.len(),
        churn_rate,
        avg_clv,
        latest_month_revenue: latest.revenue,
        latest_month_profit: latest.profit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use insight_spi::Month;

    fn customer(id: &str, clv: f64, churned: bool) -> CustomerRecord {
        CustomerRecord {
            customer_id: id.to_string(),
            segment: "SMB".to_string(),
            clv,
            churn_flag: churned,
            join_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
        }
    }

    fn month(m: u32, revenue: f64, profit: f64) -> MonthlyAggregate {
        MonthlyAggregate {
            month: Month::new(2023, m).unwrap(),
            revenue,
            profit,
            quantity: 1,
            profit_margin: profit / revenue,
            revenue_growth: 0.0,
        }
    }

    #[test]
    fn test_kpi_summary() {
        let customers = vec![
            customer("a", 100.0, true),
            customer("b", 200.0, false),
            customer("c", 300.0, false),
            customer("d", 400.0, true),
        ];
        let monthly = vec![month(1, 10.0, 1.0), month(2, 20.0, 4.0)];

        let kpis = kpi_summary(&customers, &monthly).unwrap();
        assert_eq!(kpis.total_customers, 4);
        assert!((kpis.churn_rate - 0.5).abs() < 1e-12);
        assert!((kpis.avg_clv - 250.0).abs() < 1e-12);
        assert_eq!(kpis.latest_month_revenue, 20.0);
        assert_eq!(kpis.latest_month_profit, 4.0);
    }

    #[test]
    fn test_empty_sales_is_no_data() {
        let result = kpi_summary(&[customer("a", 1.0, false)], &[]);
        assert!(matches!(result, Err(InsightError::NoData(_))));
    }

    #[test]
    fn test_no_customers() {
        let kpis = kpi_summary(&[], &[month(1, 10.0, 1.0)]).unwrap();
        assert_eq!(kpis.total_customers, 0);
        assert_eq!(kpis.churn_rate, 0.0);
        assert_eq!(kpis.avg_clv, 0.0);
    }
}
