//! Trait for forecast producers

use crate::error::Result;
use crate::model::MonthlyAggregate;

/// A producer that turns the monthly aggregate into future estimates.
pub trait Forecaster {
    /// What the producer emits (rows, or a tagged availability result).
    type Output;

    /// Short name used in logs and the dashboard.
    fn name(&self) -> &str;

    /// Fit on the monthly history and extrapolate.
    fn forecast(&self, monthly: &[MonthlyAggregate]) -> Result<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InsightError;

    /// Mock implementation: repeats the last month's revenue
    struct NaiveForecaster {
        steps: usize,
    }

    impl Forecaster for NaiveForecaster {
        type Output = Vec<f64>;

        fn name(&self) -> &str {
            "naive"
        }

        fn forecast(&self, monthly: &[MonthlyAggregate]) -> Result<Vec<f64>> {
            let last = monthly
                .last()
                .ok_or_else(|| InsightError::NoData("no months".to_string()))?;
            Ok(vec![last.revenue; self.steps])
        }
    }

    #[test]
    fn test_mock_forecaster() {
        let month = crate::model::Month::new(2024, 1).unwrap();
        let monthly = vec![MonthlyAggregate {
            month,
            revenue: 50.0,
            profit: 5.0,
            quantity: 1,
            profit_margin: 0.1,
            revenue_growth: 0.0,
        }];
        let forecaster = NaiveForecaster { steps: 2 };
        assert_eq!(forecaster.name(), "naive");
        assert_eq!(forecaster.forecast(&monthly).unwrap(), vec![50.0, 50.0]);
        assert!(forecaster.forecast(&[]).is_err());
    }
}
