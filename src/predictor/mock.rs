use crate::asset::Asset;
use crate::error::Result;
use crate::predictor::Predictor;
use rand::Rng;

/// Draws from the asset's demo band and ignores the history entirely.
pub struct MockPredictor;

impl Predictor for MockPredictor {
    fn name(&self) -> &str {
        "mock"
    }

    fn predict(&self, asset: &Asset, _window: &[f64]) -> Result<f64> {
        let mut rng = rand::rng();
        Ok(asset.band.sample(rng.random()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::find;

    #[test]
    fn test_mock_stays_in_band() {
        let btc = find("btc").unwrap();
        for _ in 0..100 {
            let price = MockPredictor.predict(btc, &[]).unwrap();
            assert!((47000.0..53000.0).contains(&price));
        }
    }
}
