use crate::asset::{Asset, ASSETS};
use crate::data::{round_cents, OHLCVData, Prediction};
use crate::error::{AugurError, Result};
use crate::predictor::Predictor;
use crate::series::PriceSeries;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub const MAX_RANGE_DAYS: i64 = 366;

pub struct PredictionEngine {
    predictor: Box<dyn Predictor>,
    seq_length: usize,
    series: HashMap<&'static str, PriceSeries>,
}

impl PredictionEngine {
    pub fn new(predictor: Box<dyn Predictor>, seq_length: usize) -> Self {
        PredictionEngine {
            predictor,
            seq_length: seq_length.max(1),
            series: HashMap::new(),
        }
    }

    /// Engine with a synthetic series for every registered asset over `[start, end]`.
    pub fn synthetic(
        predictor: Box<dyn Predictor>,
        seq_length: usize,
        start: NaiveDate,
        end: NaiveDate,
        seed: u64,
    ) -> Self {
        let mut engine = Self::new(predictor, seq_length);
        for asset in ASSETS.iter() {
            let series = PriceSeries::synthetic(asset, start, end, seed);
            match (series.first_date(), series.last_date()) {
                (Some(first), Some(last)) => {
                    debug!("{}: {} bars from {} to {}", series.symbol, series.len(), first, last)
                }
                _ => warn!("No bars generated for {} between {} and {}", asset.symbol, start, end),
            }
            engine.add_series(asset, series);
        }
        info!(
            "Loaded {} synthetic series from {} to {} using the {} predictor",
            engine.series.len(),
            start,
            end,
            engine.predictor.name()
        );
        engine
    }

    pub fn add_series(&mut self, asset: &'static Asset, series: PriceSeries) {
        self.series.insert(asset.id, series);
    }

    pub fn seq_length(&self) -> usize {
        self.seq_length
    }

    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }

    pub fn series(&self, asset: &Asset) -> Result<&PriceSeries> {
        self.series
            .get(asset.id)
            .ok_or_else(|| AugurError::NoData(asset.symbol.to_string()))
    }

    pub fn predict(&self, asset: &Asset, date: NaiveDate) -> Result<Prediction> {
        let series = self.series(asset)?;
        let idx = series
            .position(date)
            .ok_or(AugurError::DateNotFound(date))?;

        let window = series
            .window(date, self.seq_length)
            .ok_or(AugurError::InsufficientHistory {
                date,
                needed: self.seq_length,
                available: idx + 1,
            })?;

        let price = self.predictor.predict(asset, &window)?;
        debug!("{} {} -> {:.4}", asset.symbol, date, price);

        Ok(Prediction {
            ticker: asset.symbol.to_string(),
            date,
            predicted_price: round_cents(price),
            actual_price: None,
        })
    }

    /// Predicts every calendar day in `[start, end]`, silently skipping days
    /// that cannot be predicted.
    pub fn predict_range(
        &self,
        asset: &Asset,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Prediction>> {
        if start > end {
            return Err(AugurError::InvalidRange(format!(
                "start {start} is after end {end}"
            )));
        }
        let span = (end - start).num_days() + 1;
        if span > MAX_RANGE_DAYS {
            return Err(AugurError::InvalidRange(format!(
                "{span} days requested, at most {MAX_RANGE_DAYS} allowed"
            )));
        }

        let series = self.series(asset)?;
        let mut predictions = Vec::new();

        for date in start.iter_days().take_while(|d| *d <= end) {
            match self.predict(asset, date) {
                Ok(mut prediction) => {
                    prediction.actual_price = series.get(date).map(|bar| bar.close);
                    predictions.push(prediction);
                }
                Err(AugurError::Predictor(msg)) => return Err(AugurError::Predictor(msg)),
                Err(e) => debug!("skipping {} {}: {}", asset.symbol, date, e),
            }
        }

        Ok(predictions)
    }

    pub fn historical(&self, asset: &Asset, days: u32) -> Result<Vec<OHLCVData>> {
        if days == 0 {
            return Err(AugurError::InvalidRange("days must be positive".into()));
        }
        let bars = self.series(asset)?.last_days(days);
        if bars.is_empty() {
            return Err(AugurError::NoData(asset.symbol.to_string()));
        }
        Ok(bars.to_vec())
    }
}
