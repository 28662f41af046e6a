use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Trades Monday to Friday only.
    Stock,
    Crypto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PredictionBand {
    /// `floor + U[0,1) * width`
    Above { floor: f64, width: f64 },
    /// `center + (U[0,1) - 0.5) * width`
    Around { center: f64, width: f64 },
}

impl PredictionBand {
    pub fn sample(&self, unit: f64) -> f64 {
        match *self {
            PredictionBand::Above { floor, width } => floor + unit * width,
            PredictionBand::Around { center, width } => center + (unit - 0.5) * width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    pub id: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub class: AssetClass,
    pub base_price: f64,
    pub volatility: f64,
    #[serde(skip)]
    pub band: PredictionBand,
}

impl Asset {
    pub fn trades_on(&self, date: chrono::NaiveDate) -> bool {
        use chrono::{Datelike, Weekday};
        match self.class {
            AssetClass::Crypto => true,
            AssetClass::Stock => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }
}

pub static ASSETS: [Asset; 3] = [
    Asset {
        id: "tsla",
        symbol: "TSLA",
        name: "Tesla",
        color: "#dc2626",
        description: "Electric Vehicle Pioneer",
        class: AssetClass::Stock,
        base_price: 250.0,
        volatility: 15.0,
        band: PredictionBand::Above {
            floor: 280.0,
            width: 40.0,
        },
    },
    Asset {
        id: "btc",
        symbol: "BTC-USD",
        name: "Bitcoin",
        color: "#f59e0b",
        description: "Digital Gold",
        class: AssetClass::Crypto,
        base_price: 45000.0,
        volatility: 2000.0,
        band: PredictionBand::Above {
            floor: 47000.0,
            width: 6000.0,
        },
    },
    Asset {
        id: "usdt",
        symbol: "USDT-USD",
        name: "Tether",
        color: "#10b981",
        description: "Stable Cryptocurrency",
        class: AssetClass::Crypto,
        base_price: 1.0,
        volatility: 0.02,
        band: PredictionBand::Around {
            center: 1.0,
            width: 0.04,
        },
    },
];

/// Resolves an asset by route id (`btc`) or ticker symbol (`BTC-USD`), ignoring case.
pub fn find(key: &str) -> Option<&'static Asset> {
    let key = key.trim();
    ASSETS
        .iter()
        .find(|a| a.id.eq_ignore_ascii_case(key) || a.symbol.eq_ignore_ascii_case(key))
}
