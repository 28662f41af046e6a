use crate::asset::Asset;
use crate::error::{AugurError, Result};
use std::str::FromStr;

pub mod mock;
pub mod trend;

pub use mock::MockPredictor;
pub use trend::TrendPredictor;

/// Forecasts the next close of an asset from the closes leading up to the requested date.
pub trait Predictor: Send + Sync {
    fn name(&self) -> &str;
    fn predict(&self, asset: &Asset, window: &[f64]) -> Result<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorKind {
    Mock,
    Trend,
}

impl PredictorKind {
    pub fn build(self) -> Box<dyn Predictor> {
        match self {
            PredictorKind::Mock => Box::new(MockPredictor),
            PredictorKind::Trend => Box::new(TrendPredictor),
        }
    }
}

impl FromStr for PredictorKind {
    type Err = AugurError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" | "random" => Ok(PredictorKind::Mock),
            "trend" | "linear" => Ok(PredictorKind::Trend),
            other => Err(AugurError::Predictor(format!("unknown predictor '{other}'"))),
        }
    }
}
