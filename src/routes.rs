use crate::engine::PredictionEngine;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub mod assets;
pub mod historical;
pub mod predict;

/// Shared state handed to every handler.
pub struct AppState {
    pub engine: PredictionEngine,
}

impl AppState {
    pub fn new(engine: PredictionEngine) -> Arc<Self> {
        Arc::new(AppState { engine })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/assets", get(assets::list))
        .route("/api/predict/range", post(predict::predict_range))
        .route("/api/predict/{asset_id}", post(predict::predict))
        .route("/api/historical/{ticker}", get(historical::historical))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
