pub mod yahoo;

pub use self::yahoo::HistoryClient;

use chrono::NaiveDate;
use thiserror::Error;

/// One daily trading-session record as delivered by the provider.
///
/// Fields may hold `f64::NAN` when the provider reported a partial row;
/// the quality layer is responsible for repairing those.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl DailyBar {
    pub fn has_missing(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }
}

/// Errors from the market-data provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("provider error: {code} - {description}")]
    Api { code: String, description: String },
    #[error("malformed provider response: {0}")]
    Decode(String),
    #[error("no history returned for {symbol}")]
    EmptyHistory { symbol: String },
}
