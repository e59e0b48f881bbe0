//! Linear trend forecasting
//!
//! Fits revenue against the month index with ordinary least squares and
//! extrapolates a fixed number of months.
//!
//! ## When to Use
//!
//! - Quick baseline next to the seasonal model
//! - Histories too short for any seasonal structure

use crate::aggregate::revenue_series;
use insight_api::TREND_HORIZON;
use insight_spi::{Forecaster, InsightError, MonthlyAggregate, Result, TrendForecastRow};

/// Fitted line `y = intercept + slope * t`.
///
/// # Example
///
/// ```rust
/// use insight_core::trend::LinearTrend;
///
/// let model = LinearTrend::fit(&[10.0, 12.0, 14.0, 16.0]).unwrap();
/// assert!((model.slope() - 2.0).abs() < 1e-10);
/// assert_eq!(model.extrapolate(2), vec![18.0, 20.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTrend {
    /// Y-intercept
    intercept: f64,
    /// Slope (trend per time unit)
    slope: f64,
    /// Number of observations used in fitting
    n_observations: usize,
    /// R-squared value
    r_squared: f64,
}

impl LinearTrend {
    /// Fit against the time index 0, 1, 2, ...
    pub fn fit(values: &[f64]) -> Result<Self> {
        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f64, y))
            .collect();
        Self::fit_points(&points)
    }

    /// Fit against arbitrary `(t, y)` points.
    pub fn fit_points(points: &[(f64, f64)]) -> Result<Self> {
        if points.len() < 2 {
            return Err(InsightError::DegenerateFit {
                required: 2,
                actual: points.len(),
            });
        }

        let n = points.len() as f64;
        let sum_t: f64 = points.iter().map(|(t, _)| t).sum();
        let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
        let sum_t2: f64 = points.iter().map(|(t, _)| t * t).sum();
        let sum_ty: f64 = points.iter().map(|(t, y)| t * y).sum();

        // OLS formulas
        let denominator = n * sum_t2 - sum_t * sum_t;
        if denominator.abs() < 1e-10 {
            // every point shares the same t
            return Err(InsightError::DegenerateFit {
                required: 2,
                actual: 1,
            });
        }

        let slope = (n * sum_ty - sum_t * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_t) / n;

        let mean_y = sum_y / n;
        let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
        let ss_res: f64 = points
            .iter()
            .map(|(t, y)| (y - (intercept + slope * t)).powi(2))
            .sum();
        let r_squared = if ss_tot > 1e-10 {
            1.0 - ss_res / ss_tot
        } else {
            1.0
        };

        Ok(Self {
            intercept,
            slope,
            n_observations: points.len(),
            r_squared,
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficient of determination
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    pub fn value_at(&self, t: f64) -> f64 {
        self.intercept + self.slope * t
    }

    /// Values at indices `n, n+1, ...` for an index-fitted model.
    pub fn extrapolate(&self, steps: usize) -> Vec<f64> {
        (0..steps)
            .map(|i| self.value_at((self.n_observations + i) as f64))
            .collect()
    }
}

/// Trend-line producer with the fixed 3-month horizon.
#[derive(Debug, Clone)]
pub struct TrendForecaster {
    horizon: usize,
}

impl Default for TrendForecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendForecaster {
    pub fn new() -> Self {
        Self {
            horizon: TREND_HORIZON,
        }
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }
}

impl Forecaster for TrendForecaster {
    type Output = Vec<TrendForecastRow>;

    fn name(&self) -> &str {
        "linear-trend"
    }

    /// Fails with [`InsightError::DegenerateFit`] for fewer than two months.
    fn forecast(&self, monthly: &[MonthlyAggregate]) -> Result<Vec<TrendForecastRow>> {
        let model = LinearTrend::fit(&revenue_series(monthly))?;
        tracing::debug!(
            slope = model.slope(),
            intercept = model.intercept(),
            r_squared = model.r_squared(),
            "Fitted revenue trend"
        );

        let n = monthly.len();
        Ok(model
            .extrapolate(self.horizon)
            .into_iter()
            .enumerate()
            .map(|(i, forecast_revenue)| TrendForecastRow {
                month_index: n + i,
                forecast_revenue,
            })
            .collect())
    }
}
