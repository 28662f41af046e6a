use crate::predictor::PredictorKind;
use chrono::NaiveDate;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Closes fed to the predictor, ending at the requested date.
    pub seq_length: usize,
    pub predictor: PredictorKind,
    pub series_start: NaiveDate,
    pub seed: u64,
    /// Base URL the dashboard commands call.
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "0.0.0.0".to_string(),
            port: 3000,
            seq_length: 30,
            predictor: PredictorKind::Trend,
            series_start: NaiveDate::from_ymd_opt(2015, 7, 1).unwrap_or_default(),
            seed: 42,
            api_url: "http://127.0.0.1:3000".to_string(),
            timeout: Duration::from_millis(5000),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Settings::default();
        Settings {
            host: env_str("AUGUR_HOST", &defaults.host),
            port: env_parse("PORT", defaults.port),
            seq_length: env_parse("AUGUR_SEQ_LENGTH", defaults.seq_length),
            predictor: env_parse("AUGUR_PREDICTOR", defaults.predictor),
            series_start: env_var("AUGUR_SERIES_START")
                .and_then(|raw| match crate::error::parse_date(&raw) {
                    Ok(date) => Some(date),
                    Err(e) => {
                        tracing::warn!("AUGUR_SERIES_START: {e}; using default");
                        None
                    }
                })
                .unwrap_or(defaults.series_start),
            seed: env_parse("AUGUR_SEED", defaults.seed),
            api_url: env_str("AUGUR_API_URL", &defaults.api_url),
            timeout: Duration::from_millis(env_parse(
                "AUGUR_TIMEOUT_MS",
                defaults.timeout.as_millis() as u64,
            )),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_str(name: &str, default: &str) -> String {
    env_var(name).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    match env_var(name) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("{name}={raw} could not be parsed; using default");
            default
        }),
        None => default,
    }
}
