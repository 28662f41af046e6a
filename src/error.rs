use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AugurError {
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Date not found in asset series: {0}")]
    DateNotFound(NaiveDate),

    #[error("Not enough historical data before {date}: need {needed} bars, have {available}")]
    InsufficientHistory {
        date: NaiveDate,
        needed: usize,
        available: usize,
    },

    #[error("No data found for {0}")]
    NoData(String),

    #[error("Prediction failed: {0}")]
    Predictor(String),

    #[error("Request error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, AugurError>;

impl AugurError {
    pub fn status(&self) -> StatusCode {
        match self {
            AugurError::UnknownAsset(_) | AugurError::DateNotFound(_) | AugurError::NoData(_) => {
                StatusCode::NOT_FOUND
            }
            AugurError::InvalidDate(_)
            | AugurError::InvalidBody(_)
            | AugurError::InvalidRange(_)
            | AugurError::InsufficientHistory { .. } => StatusCode::BAD_REQUEST,
            AugurError::Http { .. } | AugurError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AugurError::Predictor(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AugurError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("rejecting request: {self}");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for AugurError {
    fn from(rejection: JsonRejection) -> Self {
        AugurError::InvalidBody(rejection.body_text())
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AugurError::InvalidDate(raw.to_string()))
}
