use crate::asset;
use crate::data::OHLCVData;
use crate::error::AugurError;
use crate::routes::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DEFAULT_DAYS: u32 = 365;

#[derive(Deserialize, Debug, Default)]
pub struct HistoricalQuery {
    pub days: Option<u32>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct HistoricalResponse {
    pub ticker: String,
    pub data: Vec<OHLCVData>,
}

/// GET /api/historical/{ticker}?days=N
pub async fn historical(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
    Query(query): Query<HistoricalQuery>,
) -> Result<Json<HistoricalResponse>, AugurError> {
    let asset = asset::find(&ticker).ok_or(AugurError::UnknownAsset(ticker))?;
    let data = state
        .engine
        .historical(asset, query.days.unwrap_or(DEFAULT_DAYS))?;

    Ok(Json(HistoricalResponse {
        ticker: asset.symbol.to_string(),
        data,
    }))
}
