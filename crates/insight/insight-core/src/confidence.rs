//! Uncertainty bands for point forecasts.

use serde::Serialize;

/// Point forecasts with a symmetric band at one confidence level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandedForecast {
    pub point: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    /// e.g. 0.8 for an 80% band
    pub level: f64,
}

impl BandedForecast {
    /// Band of `z * spread[i]` around each point.
    ///
    /// `spread` shorter than `point` is padded with its last value (0 when
    /// empty).
    pub fn with_spread(point: Vec<f64>, spread: &[f64], level: f64) -> Self {
        let z = z_score(level);
        let fallback = spread.last().copied().unwrap_or(0.0);

        let (lower, upper) = point
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let half_width = z * spread.get(i).copied().unwrap_or(fallback);
                (p - half_width, p + half_width)
            })
            .unzip();

        Self {
            point,
            lower,
            upper,
            level,
        }
    }

    /// Constant band from the residual spread of an in-sample fit.
    pub fn in_sample(fitted: Vec<f64>, residuals: &[f64], level: f64) -> Self {
        let sigma = residual_std(residuals);
        let spread = vec![sigma; fitted.len()];
        Self::with_spread(fitted, &spread, level)
    }

    /// Band for steps `1..=n` past the history; step `h` is widened by
    /// `sqrt(h)`.
    pub fn ahead(point: Vec<f64>, residuals: &[f64], level: f64) -> Self {
        let sigma = residual_std(residuals);
        let spread: Vec<f64> = (1..=point.len()).map(|h| sigma * (h as f64).sqrt()).collect();
        Self::with_spread(point, &spread, level)
    }
}

/// Population standard deviation of residuals; 0 for an empty slice.
pub fn residual_std(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    let n = residuals.len() as f64;
    let mean = residuals.iter().sum::<f64>() / n;
    let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Two-sided normal quantiles at common levels; `z_score` interpolates
/// between them. Levels and z values are both strictly increasing.
const Z_TABLE: [(f64, f64); 7] = [
    (0.0, 0.0),
    (0.5, 0.674),
    (0.8, 1.282),
    (0.9, 1.645),
    (0.95, 1.96),
    (0.99, 2.576),
    (0.999, 3.291),
];

/// Approximate two-sided z for `level`, non-decreasing in `level`.
///
/// Exact at the tabulated levels, linear in between, clamped outside
/// `[0, 0.999]`.
pub fn z_score(level: f64) -> f64 {
    let (first_level, first_z) = Z_TABLE[0];
    if level.is_nan() || level <= first_level {
        return first_z;
    }
    for pair in Z_TABLE.windows(2) {
        let (lo_level, lo_z) = pair[0];
        let (hi_level, hi_z) = pair[1];
        if level == hi_level {
            return hi_z;
        }
        if level < hi_level {
            let fraction = (level - lo_level) / (hi_level - lo_level);
            return lo_z + fraction * (hi_z - lo_z);
        }
    }
    Z_TABLE[Z_TABLE.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_spread() {
        let point = vec![100.0, 110.0, 120.0];
        let band = BandedForecast::with_spread(point.clone(), &[5.0, 10.0, 15.0], 0.95);

        assert_eq!(band.point, point);
        assert_eq!(band.level, 0.95);
        assert!((band.lower[0] - (100.0 - 1.96 * 5.0)).abs() < 1e-9);
        assert!((band.upper[2] - (120.0 + 1.96 * 15.0)).abs() < 1e-9);
    }

    #[test]
    fn test_short_spread_is_padded() {
        let band = BandedForecast::with_spread(vec![1.0, 2.0], &[1.0], 0.8);
        assert!((band.upper[1] - (2.0 + 1.282)).abs() < 1e-12);
    }

    #[test]
    fn test_ahead_widens() {
        let residuals = vec![-2.0, 1.0, -1.0, 2.0, 0.0];
        let band = BandedForecast::ahead(vec![100.0, 110.0, 120.0], &residuals, 0.8);

        let width = |i: usize| band.upper[i] - band.lower[i];
        assert!(width(2) > width(1));
        assert!(width(1) > width(0));
        assert!((width(3 - 1) / width(0) - 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_in_sample_is_constant() {
        let band = BandedForecast::in_sample(vec![1.0, 5.0], &[-1.0, 1.0], 0.8);
        assert!((band.upper[0] - band.lower[0] - (band.upper[1] - band.lower[1])).abs() < 1e-12);
    }

    #[test]
    fn test_zero_residuals_collapse_band() {
        let band = BandedForecast::ahead(vec![5.0], &[0.0, 0.0], 0.8);
        assert_eq!(band.lower, vec![5.0]);
        assert_eq!(band.upper, vec![5.0]);
    }

    #[test]
    fn test_residual_std() {
        assert_eq!(residual_std(&[]), 0.0);
        assert!((residual_std(&[1.0, -1.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_z_scores() {
        assert_eq!(z_score(0.95), 1.96);
        assert_eq!(z_score(0.8), 1.282);
        assert_eq!(z_score(0.5), 0.674);
        // between tabulated levels
        assert!(z_score(0.3) > 0.0 && z_score(0.3) < 0.674);
        assert!(z_score(0.7) > 0.674 && z_score(0.7) < 1.282);
        assert!((z_score(0.7) - (0.674 + 2.0 / 3.0 * 0.608)).abs() < 1e-12);
        assert_eq!(z_score(1.0), 3.291);
    }

    #[test]
    fn test_band_width_grows_with_level() {
        let residuals = [-10.0, 10.0, -10.0, 10.0];
        let width = |level: f64| {
            let band = BandedForecast::ahead(vec![100.0], &residuals, level);
            band.upper[0] - band.lower[0]
        };

        let levels: Vec<f64> = (1..100).map(|i| i as f64 / 100.0).collect();
        for pair in levels.windows(2) {
            assert!(
                width(pair[0]) <= width(pair[1]),
                "band at {} wider than at {}",
                pair[0],
                pair[1]
            );
        }
        assert!(width(0.3) < width(0.6));
        assert!(width(0.7) < width(0.8));
    }
}
