use crate::asset;
use crate::data::Prediction;
use crate::error::{parse_date, AugurError};
use crate::routes::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize, Serialize, Debug)]
pub struct PredictBody {
    pub date_str: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct RangeBody {
    pub start_date: String,
    pub end_date: String,
    pub ticker: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct RangeResponse {
    pub predictions: Vec<Prediction>,
}

/// POST /api/predict/{asset_id}
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<String>,
    payload: Result<Json<PredictBody>, JsonRejection>,
) -> Result<Json<Prediction>, AugurError> {
    let Json(body) = payload?;
    let asset = asset::find(&asset_id).ok_or(AugurError::UnknownAsset(asset_id))?;
    let date = parse_date(&body.date_str)?;

    let prediction = state.engine.predict(asset, date)?;
    info!(
        "predicted {} for {}: {}",
        prediction.ticker, prediction.date, prediction.predicted_price
    );
    Ok(Json(prediction))
}

/// POST /api/predict/range
pub async fn predict_range(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RangeBody>, JsonRejection>,
) -> Result<Json<RangeResponse>, AugurError> {
    let Json(body) = payload?;
    let asset = asset::find(&body.ticker).ok_or(AugurError::UnknownAsset(body.ticker))?;
    let start = parse_date(&body.start_date)?;
    let end = parse_date(&body.end_date)?;

    let predictions = state.engine.predict_range(asset, start, end)?;
    info!(
        "predicted {} days of {} between {} and {}",
        predictions.len(),
        asset.symbol,
        start,
        end
    );
    Ok(Json(RangeResponse { predictions }))
}
