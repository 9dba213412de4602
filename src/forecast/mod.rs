use std::fmt;

use crate::ledger::PricePoint;

/// Errors raised at the predictor boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// Fewer than two points; no line can be fit.
    InsufficientData { points: usize },
    /// Zero regression denominator. Unreachable for sequential positions
    /// with two or more points, checked anyway.
    DegenerateDataset,
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastError::InsufficientData { points } => {
                write!(f, "need at least two data points to predict (have {points})")
            }
            ForecastError::DegenerateDataset => {
                write!(f, "unable to compute prediction for this dataset")
            }
        }
    }
}

impl std::error::Error for ForecastError {}

/// Ordinary-least-squares extrapolation over a price series: fit
/// `y = intercept + slope * x` with `x` the sequential position and `y`
/// the per-gram price, then evaluate `steps_ahead` positions past the
/// last point. The result is rounded to 4 decimal places.
pub fn predict(points: &[PricePoint], steps_ahead: u32) -> Result<f64, ForecastError> {
    if points.len() < 2 {
        return Err(ForecastError::InsufficientData {
            points: points.len(),
        });
    }

    let n = points.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for point in points {
        let x = point.position as f64;
        let y = point.price_per_gram;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(ForecastError::DegenerateDataset);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    let next_x = (points.len() - 1) as f64 + f64::from(steps_ahead);
    Ok(round4(intercept + slope * next_x))
}

/// Round to 4 decimal places, the precision quoted on every per-gram value.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(position, &price_per_gram)| PricePoint {
                position,
                price_per_gram,
            })
            .collect()
    }

    #[test]
    fn linear_series_extrapolates_exactly() {
        // slope 10, intercept 100 -> 130 at x = 3
        let pts = points(&[100.0, 110.0, 120.0]);
        assert_eq!(predict(&pts, 1).unwrap(), 130.0);
        assert_eq!(predict(&pts, 3).unwrap(), 150.0);
    }

    #[test]
    fn noisy_series_rounds_to_four_places() {
        let pts = points(&[100.0, 101.0, 103.0]);
        // OLS: slope 1.5, intercept 99.8333... -> 104.3333 at x = 3.
        assert_eq!(predict(&pts, 1).unwrap(), 104.3333);
    }

    #[test]
    fn too_few_points_is_insufficient() {
        assert_eq!(
            predict(&[], 1).unwrap_err(),
            ForecastError::InsufficientData { points: 0 }
        );
        assert_eq!(
            predict(&points(&[100.0]), 1).unwrap_err(),
            ForecastError::InsufficientData { points: 1 }
        );
    }
}
