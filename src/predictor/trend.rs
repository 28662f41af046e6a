use crate::asset::Asset;
use crate::error::{AugurError, Result};
use crate::predictor::Predictor;

/// Fits a least-squares line through the window and extrapolates one step.
pub struct TrendPredictor;

impl TrendPredictor {
    fn fit(window: &[f64]) -> (f64, f64) {
        let n = window.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = window.iter().sum::<f64>() / n;

        let (mut cov, mut var) = (0.0, 0.0);
        for (i, y) in window.iter().enumerate() {
            let dx = i as f64 - mean_x;
            cov += dx * (y - mean_y);
            var += dx * dx;
        }

        let slope = if var > 0.0 { cov / var } else { 0.0 };
        (slope, mean_y - slope * mean_x)
    }
}

impl Predictor for TrendPredictor {
    fn name(&self) -> &str {
        "trend"
    }

    fn predict(&self, _asset: &Asset, window: &[f64]) -> Result<f64> {
        if window.is_empty() {
            return Err(AugurError::Predictor("empty input window".into()));
        }
        if window.iter().any(|v| !v.is_finite()) {
            return Err(AugurError::Predictor("non-finite value in window".into()));
        }

        let (slope, intercept) = Self::fit(window);
        let next = intercept + slope * window.len() as f64;
        Ok(next.max(0.0))
    }
}
