//! Trading agent (Garves) payloads.

use serde::Deserialize;

use super::lenient;

/// `GET /api/trades`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TradingSnapshot {
    #[serde(deserialize_with = "lenient::number")]
    pub wins: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub losses: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub pending: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub total_pnl: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub balance: f64,
    #[serde(deserialize_with = "lenient::list")]
    pub trades: Vec<Trade>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Trade {
    #[serde(deserialize_with = "lenient::text")]
    pub time: String,
    #[serde(deserialize_with = "lenient::text")]
    pub market: String,
    #[serde(deserialize_with = "lenient::text")]
    pub side: String,
    #[serde(deserialize_with = "lenient::number")]
    pub size: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub price: f64,
    /// Unset while the trade is still open.
    #[serde(deserialize_with = "lenient::opt_number")]
    pub pnl: Option<f64>,
    /// Model confidence, 0–1.
    #[serde(deserialize_with = "lenient::number")]
    pub confidence: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub status: String,
}

/// `GET /api/garves/regime`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Regime {
    #[serde(deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(deserialize_with = "lenient::number")]
    pub confidence: f64,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub fear_greed: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub updated: String,
}

/// `GET /api/logs`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogFeed {
    #[serde(deserialize_with = "lenient::text_list")]
    pub lines: Vec<String>,
}

/// `GET /api/garves/report-4h`
///
/// Every section is optional; the report text only includes what is present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Report4h {
    #[serde(deserialize_with = "lenient::opt_text")]
    pub period: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub trades: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub wins: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub losses: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub pnl: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub best_market: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub worst_market: Option<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub notes: Vec<String>,
}
