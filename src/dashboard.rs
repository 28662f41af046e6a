use crate::asset::{Asset, ASSETS};
use crate::client::{Forecast, PredictionClient, Source};
use crate::data::{random_walk, OHLCVData, Prediction, PricePoint};
use chrono::NaiveDate;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const HISTORY_DAYS: u32 = 30;

const RANGE_ERROR: &str = "Failed to get range predictions";

/// Card dashboard: one card per asset with its 30-day history and the latest prediction.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub selected_date: Option<NaiveDate>,
    predictions: HashMap<&'static str, Forecast>,
    loading: HashSet<&'static str>,
    history: HashMap<&'static str, Vec<PricePoint>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dashboard with a synthetic 30-day random walk for every asset, ending today.
    pub fn seeded<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Self {
        let mut dashboard = Self::new();
        for asset in ASSETS.iter() {
            dashboard
                .history
                .insert(asset.id, random_walk(asset, today, HISTORY_DAYS, rng));
        }
        dashboard
    }

    pub fn set_history(&mut self, asset: &'static Asset, points: Vec<PricePoint>) {
        self.history.insert(asset.id, points);
    }

    pub fn history(&self, asset: &Asset) -> &[PricePoint] {
        self.history.get(asset.id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    pub fn is_loading(&self, asset: &Asset) -> bool {
        self.loading.contains(asset.id)
    }

    pub fn prediction(&self, asset: &Asset) -> Option<&Forecast> {
        self.predictions.get(asset.id)
    }

    /// Marks `asset` as loading and returns the date to predict, or `None`
    /// while no date is selected.
    pub fn start_predict(&mut self, asset: &'static Asset) -> Option<NaiveDate> {
        let date = self.selected_date?;
        self.loading.insert(asset.id);
        Some(date)
    }

    /// Stores a result and clears the loading mark; a later result replaces an earlier one.
    pub fn finish_predict(&mut self, asset: &'static Asset, forecast: Forecast) {
        self.predictions.insert(asset.id, forecast);
        self.loading.remove(asset.id);
    }

    pub async fn predict(&mut self, asset: &'static Asset, client: &PredictionClient) -> Option<Source> {
        let date = self.start_predict(asset)?;
        let forecast = client.predict(asset, date).await;
        let source = forecast.source;
        self.finish_predict(asset, forecast);
        Some(source)
    }

    pub async fn predict_all(&mut self, client: &PredictionClient) {
        for asset in ASSETS.iter() {
            self.predict(asset, client).await;
        }
    }

    pub fn current_price(&self, asset: &Asset) -> f64 {
        self.history(asset).last().map(|p| p.price).unwrap_or(0.0)
    }

    /// Percent move between the last two history points.
    pub fn price_change(&self, asset: &Asset) -> f64 {
        match self.history(asset) {
            [.., previous, current] if previous.price != 0.0 => {
                (current.price - previous.price) / previous.price * 100.0
            }
            _ => 0.0,
        }
    }

    pub fn prediction_change(&self, asset: &Asset) -> Option<f64> {
        let forecast = self.prediction(asset)?;
        let current = self.current_price(asset);
        if current == 0.0 {
            return None;
        }
        Some((forecast.prediction.predicted_price - current) / current * 100.0)
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.selected_date {
            Some(date) => writeln!(f, "Prediction date: {date}\n")?,
            None => writeln!(f, "No prediction date selected\n")?,
        }

        for asset in ASSETS.iter() {
            let change = self.price_change(asset);
            writeln!(f, "{} ({})  {}", asset.name, asset.symbol, asset.description)?;
            writeln!(
                f,
                "  Current Price   {:>14}  {}{:.2}%",
                format_price(self.current_price(asset), asset.symbol),
                if change >= 0.0 { "+" } else { "-" },
                change.abs()
            )?;

            let history = self.history(asset);
            if let (Some(low), Some(high)) = (
                history.iter().map(|p| p.price).reduce(f64::min),
                history.iter().map(|p| p.price).reduce(f64::max),
            ) {
                writeln!(
                    f,
                    "  {}-day range    {} - {}",
                    history.len().saturating_sub(1),
                    format_price(low, asset.symbol),
                    format_price(high, asset.symbol)
                )?;
            }

            if self.is_loading(asset) {
                writeln!(f, "  AI Prediction   ...")?;
            } else if let Some(forecast) = self.prediction(asset) {
                write!(
                    f,
                    "  AI Prediction   {:>14}",
                    format_price(forecast.prediction.predicted_price, asset.symbol)
                )?;
                if let Some(pct) = self.prediction_change(asset) {
                    write!(f, "  {pct:.2}% change")?;
                }
                if forecast.source == Source::Fallback {
                    write!(f, "  (offline estimate)")?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartRow {
    Prediction {
        date: NaiveDate,
        predicted: f64,
        actual: Option<f64>,
    },
    Price {
        date: NaiveDate,
        price: f64,
        volume: u64,
    },
}

/// Single-ticker page with single-date and date-range predictions.
#[derive(Debug)]
pub struct RangeView {
    pub asset: &'static Asset,
    pub history: Vec<OHLCVData>,
    pub predictions: Vec<Prediction>,
    pub error: Option<String>,
}

impl RangeView {
    pub fn new(asset: &'static Asset) -> Self {
        RangeView {
            asset,
            history: Vec::new(),
            predictions: Vec::new(),
            error: None,
        }
    }

    /// Switches ticker and reloads its recent history.
    pub async fn select_ticker(&mut self, asset: &'static Asset, client: &PredictionClient) {
        self.asset = asset;
        self.predictions.clear();
        self.load_history(client).await;
    }

    pub async fn load_history(&mut self, client: &PredictionClient) {
        let (bars, _) = client.historical(self.asset, HISTORY_DAYS).await;
        self.history = bars;
    }

    pub async fn predict_single(&mut self, date: NaiveDate, client: &PredictionClient) {
        self.error = None;
        let forecast = client.predict(self.asset, date).await;
        self.predictions = vec![forecast.prediction];
    }

    pub async fn predict_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        client: &PredictionClient,
    ) {
        self.error = None;
        if start > end {
            self.error = Some(RANGE_ERROR.to_string());
            return;
        }
        let (predictions, _) = client.predict_range(self.asset, start, end).await;
        self.predictions = predictions;
    }

    /// Predicted/actual pairs once predictions exist, otherwise the loaded history.
    pub fn chart_data(&self) -> Vec<ChartRow> {
        if !self.predictions.is_empty() {
            return self
                .predictions
                .iter()
                .map(|p| ChartRow::Prediction {
                    date: p.date,
                    predicted: p.predicted_price,
                    actual: p.actual_price,
                })
                .collect();
        }
        self.history
            .iter()
            .map(|h| ChartRow::Price {
                date: h.date,
                price: h.close,
                volume: h.volume,
            })
            .collect()
    }
}

impl fmt::Display for RangeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.asset.name, self.asset.symbol)?;
        if let Some(err) = &self.error {
            writeln!(f, "error: {err}")?;
        }
        for row in self.chart_data() {
            match row {
                ChartRow::Prediction {
                    date,
                    predicted,
                    actual,
                } => writeln!(
                    f,
                    "  {date}  predicted {:>14}  actual {:>14}",
                    format_price(predicted, self.asset.symbol),
                    actual
                        .map(|a| format_price(a, self.asset.symbol))
                        .unwrap_or_else(|| "-".to_string())
                )?,
                ChartRow::Price {
                    date,
                    price,
                    volume,
                } => writeln!(
                    f,
                    "  {date}  close {:>14}  volume {volume}",
                    format_price(price, self.asset.symbol)
                )?,
            }
        }
        Ok(())
    }
}

/// BTC with thousands separators, USDT to four decimals, everything else to cents.
pub fn format_price(price: f64, symbol: &str) -> String {
    if symbol.contains("BTC") {
        format!("${}", group_thousands(price))
    } else if symbol.contains("USDT") {
        format!("${price:.4}")
    } else {
        format!("${price:.2}")
    }
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::find;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(d: u32, price: f64) -> PricePoint {
        PricePoint {
            date: date(2025, 7, d),
            price,
        }
    }

    fn offline_client() -> PredictionClient {
        PredictionClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(47123.45, "BTC-USD"), "$47,123.45");
        assert_eq!(format_price(45000.0, "BTC-USD"), "$45,000");
        assert_eq!(format_price(1234567.125, "BTC-USD"), "$1,234,567.125");
        assert_eq!(format_price(999.5, "BTC-USD"), "$999.5");
        assert_eq!(format_price(1.0012, "USDT-USD"), "$1.0012");
        assert_eq!(format_price(1.0, "USDT-USD"), "$1.0000");
        assert_eq!(format_price(275.5, "TSLA"), "$275.50");
    }

    #[test]
    fn test_seeded_history() {
        let mut rng = StdRng::seed_from_u64(9);
        let dashboard = Dashboard::seeded(date(2025, 7, 31), &mut rng);
        for asset in ASSETS.iter() {
            let history = dashboard.history(asset);
            assert_eq!(history.len(), 31);
            assert_eq!(history.last().unwrap().date, date(2025, 7, 31));
        }
    }

    #[test]
    fn test_current_price_and_change() {
        let tsla = find("tsla").unwrap();
        let mut dashboard = Dashboard::new();
        assert_eq!(dashboard.current_price(tsla), 0.0);
        assert_eq!(dashboard.price_change(tsla), 0.0);

        dashboard.set_history(tsla, vec![point(1, 250.0)]);
        assert_eq!(dashboard.current_price(tsla), 250.0);
        assert_eq!(dashboard.price_change(tsla), 0.0);

        dashboard.set_history(tsla, vec![point(1, 250.0), point(2, 200.0), point(3, 210.0)]);
        assert_eq!(dashboard.current_price(tsla), 210.0);
        assert!((dashboard.price_change(tsla) - 5.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_predict_requires_date() {
        let btc = find("btc").unwrap();
        let mut dashboard = Dashboard::new();
        assert_eq!(dashboard.predict(btc, &offline_client()).await, None);
        assert!(dashboard.prediction(btc).is_none());
    }

    #[tokio::test]
    async fn test_predict_falls_back_and_last_wins() {
        let tsla = find("tsla").unwrap();
        let client = offline_client();
        let mut dashboard = Dashboard::new();
        dashboard.set_history(tsla, vec![point(30, 300.0), point(31, 300.0)]);

        dashboard.select_date(date(2025, 8, 1));
        assert_eq!(dashboard.predict(tsla, &client).await, Some(Source::Fallback));
        dashboard.select_date(date(2025, 8, 2));
        dashboard.predict(tsla, &client).await;

        let forecast = dashboard.prediction(tsla).unwrap();
        assert_eq!(forecast.prediction.date, date(2025, 8, 2));
        assert!(!dashboard.is_loading(tsla));

        let pct = dashboard.prediction_change(tsla).unwrap();
        let expected = (forecast.prediction.predicted_price - 300.0) / 300.0 * 100.0;
        assert!((pct - expected).abs() < 1e-9);
        assert!(dashboard.to_string().contains("offline estimate"));
    }

    #[test]
    fn test_loading_is_visible_until_finished() {
        let btc = find("btc").unwrap();
        let mut dashboard = Dashboard::new();
        assert_eq!(dashboard.start_predict(btc), None);
        assert!(!dashboard.is_loading(btc));

        dashboard.select_date(date(2025, 8, 1));
        assert_eq!(dashboard.start_predict(btc), Some(date(2025, 8, 1)));
        assert!(dashboard.is_loading(btc));
        let pending = dashboard.to_string();
        assert!(pending.contains("AI Prediction   ..."));

        let forecast = Forecast {
            prediction: Prediction {
                ticker: "BTC-USD".into(),
                date: date(2025, 8, 1),
                predicted_price: 47500.25,
                actual_price: None,
            },
            source: Source::Remote,
        };
        dashboard.finish_predict(btc, forecast);
        assert!(!dashboard.is_loading(btc));
        let done = dashboard.to_string();
        assert!(!done.contains("AI Prediction   ..."));
        assert!(done.contains("$47,500.25"));
        assert!(!done.contains("offline estimate"));
    }

    #[test]
    fn test_prediction_change_without_price() {
        let usdt = find("usdt").unwrap();
        let dashboard = Dashboard::new();
        assert!(dashboard.prediction_change(usdt).is_none());
    }

    #[test]
    fn test_chart_data_prefers_predictions() {
        let btc = find("btc").unwrap();
        let mut view = RangeView::new(btc);
        view.history = vec![OHLCVData {
            date: date(2025, 7, 31),
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 45000.0,
            volume: 12,
        }];
        assert_eq!(
            view.chart_data(),
            vec![ChartRow::Price {
                date: date(2025, 7, 31),
                price: 45000.0,
                volume: 12
            }]
        );

        view.predictions = vec![Prediction {
            ticker: "BTC-USD".into(),
            date: date(2025, 8, 1),
            predicted_price: 47500.25,
            actual_price: None,
        }];
        assert_eq!(
            view.chart_data(),
            vec![ChartRow::Prediction {
                date: date(2025, 8, 1),
                predicted: 47500.25,
                actual: None
            }]
        );
    }

    #[tokio::test]
    async fn test_range_view_offline() {
        let client = offline_client();
        let mut view = RangeView::new(find("tsla").unwrap());
        view.select_ticker(find("usdt").unwrap(), &client).await;
        assert_eq!(view.asset.symbol, "USDT-USD");
        assert_eq!(view.history.len(), HISTORY_DAYS as usize);

        view.predict_range(date(2025, 8, 10), date(2025, 8, 1), &client).await;
        assert_eq!(view.error.as_deref(), Some(RANGE_ERROR));
        assert!(view.predictions.is_empty());

        view.predict_range(date(2025, 8, 1), date(2025, 8, 10), &client).await;
        assert!(view.error.is_none());
        assert_eq!(view.predictions.len(), 10);

        view.predict_single(date(2025, 8, 3), &client).await;
        assert_eq!(view.predictions.len(), 1);
        assert!(view.to_string().contains("USDT-USD"));
    }
}
