use crate::asset::Asset;
use crate::data::OHLCVData;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Pull back towards the base price per step, keeps decade-long walks near plausible levels.
const REVERSION: f64 = 0.02;

/// Daily bars for one asset, strictly ascending by date.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    bars: Vec<OHLCVData>,
}

impl PriceSeries {
    pub fn new(symbol: &str, mut bars: Vec<OHLCVData>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        PriceSeries {
            symbol: symbol.to_string(),
            bars,
        }
    }

    /// Deterministic series for `asset` over `[start, end]`. Stocks have no weekend bars.
    pub fn synthetic(asset: &Asset, start: NaiveDate, end: NaiveDate, seed: u64) -> Self {
        let salt = asset
            .symbol
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut rng = StdRng::seed_from_u64(seed ^ salt);

        let floor = asset.base_price * 0.5;
        let mut price = asset.base_price;
        let mut bars = Vec::new();

        for date in start.iter_days().take_while(|d| *d <= end) {
            if !asset.trades_on(date) {
                continue;
            }
            let open = price;
            let change = (rng.random::<f64>() - 0.5) * asset.volatility
                + (asset.base_price - price) * REVERSION;
            let close = (open + change).max(floor);
            let high = open.max(close) * (1.0 + rng.random::<f64>() * 0.01);
            let low = open.min(close) * (1.0 - rng.random::<f64>() * 0.01);

            bars.push(OHLCVData {
                date,
                open,
                high,
                low,
                close,
                volume: rng.random_range(100_000..5_000_000),
            });
            price = close;
        }

        PriceSeries {
            symbol: asset.symbol.to_string(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn bars(&self) -> &[OHLCVData] {
        &self.bars
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.bars.binary_search_by_key(&date, |b| b.date).ok()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&OHLCVData> {
        self.position(date).map(|idx| &self.bars[idx])
    }

    /// The `len` closes ending at `date` (inclusive), or `None` if the date is
    /// missing or not enough bars precede it.
    pub fn window(&self, date: NaiveDate, len: usize) -> Option<Vec<f64>> {
        let idx = self.position(date)?;
        if len == 0 || idx + 1 < len {
            return None;
        }
        Some(self.bars[idx + 1 - len..=idx].iter().map(|b| b.close).collect())
    }

    /// Bars dated within the last `days` calendar days of the series.
    pub fn last_days(&self, days: u32) -> &[OHLCVData] {
        let Some(last) = self.last_date() else {
            return &[];
        };
        if days == 0 {
            return &[];
        }
        // A span reaching past the calendar's start covers the whole series.
        let Some(cutoff) = last.checked_sub_days(Days::new(days as u64 - 1)) else {
            return &self.bars;
        };
        let from = self.bars.partition_point(|b| b.date < cutoff);
        &self.bars[from..]
    }
}
