//! Seasonal additive forecasting
//!
//! Models monthly revenue as `y(t) = intercept + slope * t + season[t mod period]`
//! where `t` counts calendar months from the first observed month, so months
//! without sales stay as gaps rather than being squeezed out. Seasonal
//! factors are the mean detrended residual for each position in the season,
//! centred to sum to zero, and are only estimated once the history spans two
//! full periods. Shorter histories forecast the trend alone.
//!
//! The model is behind the `seasonal` cargo feature. Without it, or when
//! disabled in configuration, the producer returns
//! [`SeasonalForecast::Unavailable`] instead of failing.

use insight_api::ForecastConfig;
use insight_spi::{Forecaster, MonthlyAggregate, Result, SeasonalForecast};

#[cfg(feature = "seasonal")]
use crate::confidence::BandedForecast;
#[cfg(feature = "seasonal")]
use crate::trend::LinearTrend;
#[cfg(feature = "seasonal")]
use insight_spi::{InsightError, Month, SeasonalForecastRow};

/// Whether this build carries the seasonal model.
pub const SEASONAL_COMPILED: bool = cfg!(feature = "seasonal");

/// Additive trend + seasonality model over `(month, value)` pairs.
#[cfg(feature = "seasonal")]
#[derive(Debug, Clone)]
pub struct SeasonalTrendModel {
    period: usize,
    origin: Month,
    trend: LinearTrend,
    /// Indexed by `month.ordinal() mod period`
    seasonal_factors: Vec<f64>,
    seasonal_fitted: bool,
    history: Vec<Month>,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
}

#[cfg(feature = "seasonal")]
impl SeasonalTrendModel {
    /// Fit on a chronologically ordered series.
    pub fn fit(series: &[(Month, f64)], period: usize) -> Result<Self> {
        if period < 2 {
            return Err(InsightError::InvalidParameter {
                name: "period".to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        let (origin, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) if series.len() >= 2 => (first.0, last.0),
            _ => {
                return Err(InsightError::DegenerateFit {
                    required: 2,
                    actual: series.len(),
                })
            }
        };

        let points: Vec<(f64, f64)> = series
            .iter()
            .map(|(month, y)| (month.months_since(origin) as f64, *y))
            .collect();
        let trend = LinearTrend::fit_points(&points)?;

        let span = last.months_since(origin) as usize + 1;
        let seasonal_fitted = span >= period * 2;
        let mut seasonal_factors = vec![0.0; period];

        if seasonal_fitted {
            let mut sums = vec![0.0; period];
            let mut counts = vec![0usize; period];
            for ((month, _), (t, y)) in series.iter().zip(points.iter()) {
                let pos = Self::position(*month, period);
                sums[pos] += y - trend.value_at(*t);
                counts[pos] += 1;
            }
            for pos in 0..period {
                if counts[pos] > 0 {
                    seasonal_factors[pos] = sums[pos] / counts[pos] as f64;
                }
            }

            // Normalize seasonal factors to sum to 0
            let mean_factor = seasonal_factors.iter().sum::<f64>() / period as f64;
            for factor in &mut seasonal_factors {
                *factor -= mean_factor;
            }
        }

        let mut model = Self {
            period,
            origin,
            trend,
            seasonal_factors,
            seasonal_fitted,
            history: series.iter().map(|(month, _)| *month).collect(),
            fitted: Vec::with_capacity(series.len()),
            residuals: Vec::with_capacity(series.len()),
        };

        for (month, y) in series {
            let estimate = model.predict_month(*month);
            model.fitted.push(estimate);
            model.residuals.push(y - estimate);
        }

        Ok(model)
    }

    fn position(month: Month, period: usize) -> usize {
        month.ordinal().rem_euclid(period as i64) as usize
    }

    /// Point estimate for any month, historical or future.
    pub fn predict_month(&self, month: Month) -> f64 {
        let t = month.months_since(self.origin) as f64;
        self.trend.value_at(t) + self.seasonal_factors[Self::position(month, self.period)]
    }

    pub fn trend(&self) -> &LinearTrend {
        &self.trend
    }

    pub fn seasonal_factors(&self) -> &[f64] {
        &self.seasonal_factors
    }

    /// False when the history was too short to estimate seasonality.
    pub fn has_seasonality(&self) -> bool {
        self.seasonal_fitted
    }

    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Fitted history followed by `horizon` future months, each with a band
    /// at `confidence_level`.
    pub fn forecast_rows(&self, horizon: usize, confidence_level: f64) -> Vec<SeasonalForecastRow> {
        let in_sample = BandedForecast::in_sample(self.fitted.clone(), &self.residuals, confidence_level);

        let mut rows: Vec<SeasonalForecastRow> = Vec::with_capacity(self.history.len() + horizon);
        rows.extend(self.history.iter().enumerate().map(|(i, &month)| {
            Self::row(month, in_sample.point[i], in_sample.lower[i], in_sample.upper[i])
        }));

        let last = match self.history.last() {
            Some(last) => *last,
            None => return rows,
        };
        let future_months: Vec<Month> = (1..=horizon as i64).map(|h| last.offset(h)).collect();
        let future = BandedForecast::ahead(
            future_months.iter().map(|&m| self.predict_month(m)).collect(),
            &self.residuals,
            confidence_level,
        );
        rows.extend(future_months.iter().enumerate().map(|(i, &month)| {
            Self::row(month, future.point[i], future.lower[i], future.upper[i])
        }));

        rows
    }

    fn row(month: Month, point: f64, lower: f64, upper: f64) -> SeasonalForecastRow {
        SeasonalForecastRow {
            date: month.first_day(),
            point_estimate: point,
            lower_bound: lower,
            upper_bound: upper,
            month,
        }
    }
}

/// Seasonal producer with a configurable horizon.
#[derive(Debug, Clone)]
pub struct SeasonalForecaster {
    horizon: usize,
    period: usize,
    confidence_level: f64,
    enabled: bool,
}

impl SeasonalForecaster {
    pub fn new(horizon: usize, period: usize, confidence_level: f64) -> Self {
        Self {
            horizon,
            period,
            confidence_level,
            enabled: true,
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self {
            horizon: config.seasonal_horizon,
            period: config.seasonal_period,
            confidence_level: config.interval_level,
            enabled: config.seasonal_enabled,
        }
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    #[cfg(feature = "seasonal")]
    fn produce(&self, monthly: &[MonthlyAggregate]) -> Result<SeasonalForecast> {
        if monthly.len() < 2 {
            return Ok(SeasonalForecast::unavailable(format!(
                "need at least 2 months of sales history, got {}",
                monthly.len()
            )));
        }

        let series: Vec<(Month, f64)> = monthly.iter().map(|m| (m.month, m.revenue)).collect();
        let model = SeasonalTrendModel::fit(&series, self.period)?;
        if !model.has_seasonality() {
            tracing::info!(
                "History spans fewer than {} months; seasonal forecast uses trend only",
                self.period * 2
            );
        }

        Ok(SeasonalForecast::Available {
            rows: model.forecast_rows(self.horizon, self.confidence_level),
        })
    }

    #[cfg(not(feature = "seasonal"))]
    fn produce(&self, _monthly: &[MonthlyAggregate]) -> Result<SeasonalForecast> {
        Ok(SeasonalForecast::unavailable(
            "this build does not include seasonal forecasting (enable the `seasonal` feature)",
        ))
    }
}

impl Forecaster for SeasonalForecaster {
    type Output = SeasonalForecast;

    fn name(&self) -> &str {
        "seasonal-additive"
    }

    fn forecast(&self, monthly: &[MonthlyAggregate]) -> Result<SeasonalForecast> {
        if !self.enabled {
            return Ok(SeasonalForecast::unavailable(
                "seasonal forecasting is disabled in configuration",
            ));
        }
        self.produce(monthly)
    }
}
