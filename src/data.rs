use crate::asset::Asset;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OHLCVData {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prediction {
    pub ticker: String,
    pub date: NaiveDate,
    pub predicted_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_price: Option<f64>,
}

#[inline]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Random walk of `days + 1` points ending on `end`, never dropping below half the base price.
pub fn random_walk<R: Rng + ?Sized>(
    asset: &Asset,
    end: NaiveDate,
    days: u32,
    rng: &mut R,
) -> Vec<PricePoint> {
    let floor = asset.base_price * 0.5;
    let mut price = asset.base_price;

    (0..=days)
        .rev()
        .map(|back| {
            let change = (rng.random::<f64>() - 0.5) * asset.volatility;
            price = (price + change).max(floor);
            PricePoint {
                date: end - Duration::days(back as i64),
                price: round_cents(price),
            }
        })
        .collect()
}

/// `days` independent daily bars ending on `end`, each within 5% of the base price.
pub fn ohlcv_window<R: Rng + ?Sized>(
    asset: &Asset,
    end: NaiveDate,
    days: u32,
    rng: &mut R,
) -> Vec<OHLCVData> {
    (0..days)
        .rev()
        .map(|back| {
            let variation = rng.random::<f64>() * 0.1 - 0.05;
            let close = asset.base_price * (1.0 + variation);
            OHLCVData {
                date: end - Duration::days(back as i64),
                open: close * 0.99,
                high: close * 1.02,
                low: close * 0.98,
                close,
                volume: (rng.random::<f64>() * 1_000_000.0).floor() as u64,
            }
        })
        .collect()
}

pub fn mock_prediction<R: Rng + ?Sized>(asset: &Asset, date: NaiveDate, rng: &mut R) -> Prediction {
    Prediction {
        ticker: asset.symbol.to_string(),
        date,
        predicted_price: round_cents(asset.band.sample(rng.random())),
        actual_price: None,
    }
}

/// One mock prediction per calendar day in `[start, end]`; roughly half carry an actual price.
pub fn mock_range<R: Rng + ?Sized>(
    asset: &Asset,
    start: NaiveDate,
    end: NaiveDate,
    rng: &mut R,
) -> Vec<Prediction> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let variation = rng.random::<f64>() * 0.1 - 0.05;
            let actual_price = if rng.random::<f64>() > 0.5 {
                Some(asset.base_price * (1.0 + variation * 0.8))
            } else {
                None
            };
            Prediction {
                ticker: asset.symbol.to_string(),
                date,
                predicted_price: asset.base_price * (1.0 + variation),
                actual_price,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::find;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(280.456), 280.46);
        assert_eq!(round_cents(47123.4567), 47123.46);
    }

    #[test]
    fn test_random_walk_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let tsla = find("tsla").unwrap();
        let end = date(2025, 7, 31);
        let points = random_walk(tsla, end, 30, &mut rng);

        assert_eq!(points.len(), 31);
        assert_eq!(points.first().unwrap().date, date(2025, 7, 1));
        assert_eq!(points.last().unwrap().date, end);
        for pair in points.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
        for p in &points {
            assert!(p.price >= 125.0);
            assert_eq!(round_cents(p.price), p.price);
        }
    }

    #[test]
    fn test_random_walk_respects_floor() {
        let mut rng = StdRng::seed_from_u64(1);
        let usdt = find("usdt").unwrap();
        // Long walk so the floor is actually exercised.
        let points = random_walk(usdt, date(2025, 7, 31), 2000, &mut rng);
        assert!(points.iter().all(|p| p.price >= 0.5));
    }

    #[test]
    fn test_ohlcv_window_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let btc = find("btc").unwrap();
        let bars = ohlcv_window(btc, date(2025, 7, 31), 30, &mut rng);

        assert_eq!(bars.len(), 30);
        assert_eq!(bars[0].date, date(2025, 7, 2));
        for bar in &bars {
            assert!(bar.close >= 45000.0 * 0.95 && bar.close <= 45000.0 * 1.05);
            assert!(bar.low < bar.open && bar.open < bar.close && bar.close < bar.high);
            assert!(bar.volume < 1_000_000);
        }
    }

    #[test]
    fn test_mock_prediction_bands() {
        let mut rng = StdRng::seed_from_u64(11);
        let day = date(2024, 7, 31);
        for _ in 0..200 {
            let p = mock_prediction(find("tsla").unwrap(), day, &mut rng);
            assert!(p.predicted_price >= 280.0 && p.predicted_price <= 320.0);
            assert_eq!(p.ticker, "TSLA");

            let p = mock_prediction(find("btc").unwrap(), day, &mut rng);
            assert!(p.predicted_price >= 47000.0 && p.predicted_price <= 53000.0);

            let p = mock_prediction(find("usdt").unwrap(), day, &mut rng);
            assert!(p.predicted_price >= 0.98 && p.predicted_price <= 1.02);
            assert!(p.actual_price.is_none());
        }
    }

    #[test]
    fn test_mock_range_is_inclusive() {
        let mut rng = StdRng::seed_from_u64(5);
        let tsla = find("tsla").unwrap();
        let preds = mock_range(tsla, date(2024, 2, 27), date(2024, 3, 2), &mut rng);

        let dates: Vec<_> = preds.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1),
                date(2024, 3, 2),
            ]
        );
        for p in &preds {
            assert!(p.predicted_price >= 237.5 && p.predicted_price <= 262.5);
        }
    }

    #[test]
    fn test_mock_range_empty_when_reversed() {
        let mut rng = StdRng::seed_from_u64(5);
        let btc = find("btc").unwrap();
        assert!(mock_range(btc, date(2024, 3, 2), date(2024, 3, 1), &mut rng).is_empty());
    }

    #[test]
    fn test_prediction_json_omits_missing_actual() {
        let p = Prediction {
            ticker: "TSLA".into(),
            date: date(2024, 7, 31),
            predicted_price: 275.5,
            actual_price: None,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "ticker": "TSLA", "date": "2024-07-31", "predicted_price": 275.5 })
        );
    }
}
