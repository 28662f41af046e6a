use crate::asset::Asset;
use crate::data::{mock_prediction, mock_range, ohlcv_window, OHLCVData, Prediction};
use crate::error::{AugurError, Result};
use crate::routes::historical::HistoricalResponse;
use crate::routes::predict::{PredictBody, RangeBody, RangeResponse};
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    /// The request failed and a locally generated mock was substituted.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub prediction: Prediction,
    pub source: Source,
}

/// Talks to the prediction API. Every call is a single request; failures are
/// logged and replaced by mock data, never surfaced to the caller.
#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(PredictionClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AugurError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn try_predict(&self, asset: &Asset, date: NaiveDate) -> Result<Prediction> {
        let body = PredictBody {
            date_str: date.format("%Y-%m-%d").to_string(),
        };
        self.post_json(&format!("/api/predict/{}", asset.id), &body)
            .await
    }

    pub async fn predict(&self, asset: &Asset, date: NaiveDate) -> Forecast {
        match self.try_predict(asset, date).await {
            Ok(prediction) => Forecast {
                prediction,
                source: Source::Remote,
            },
            Err(e) => {
                warn!("Prediction error for {}: {}", asset.symbol, e);
                Forecast {
                    prediction: mock_prediction(asset, date, &mut rand::rng()),
                    source: Source::Fallback,
                }
            }
        }
    }

    pub async fn predict_range(
        &self,
        asset: &Asset,
        start: NaiveDate,
        end: NaiveDate,
    ) -> (Vec<Prediction>, Source) {
        let body = RangeBody {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            ticker: asset.symbol.to_string(),
        };
        match self
            .post_json::<_, RangeResponse>("/api/predict/range", &body)
            .await
        {
            Ok(resp) => (resp.predictions, Source::Remote),
            Err(e) => {
                warn!("Range prediction error for {}: {}", asset.symbol, e);
                (mock_range(asset, start, end, &mut rand::rng()), Source::Fallback)
            }
        }
    }

    pub async fn historical(&self, asset: &Asset, days: u32) -> (Vec<OHLCVData>, Source) {
        let url = format!(
            "{}/api/historical/{}?days={}",
            self.base_url, asset.symbol, days
        );
        let result = match self.client.get(url).send().await {
            Ok(response) => Self::decode::<HistoricalResponse>(response).await,
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(resp) => (resp.data, Source::Remote),
            Err(e) => {
                warn!("Failed to load historical data for {}: {}", asset.symbol, e);
                let today = Utc::now().date_naive();
                (ohlcv_window(asset, today, days, &mut rand::rng()), Source::Fallback)
            }
        }
    }
}
