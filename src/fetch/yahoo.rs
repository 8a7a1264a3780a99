//! Daily OHLCV history from the Yahoo Finance chart endpoint.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info};

use super::{DailyBar, FetchError};

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
    #[serde(default)]
    adjclose: Vec<AdjCloseBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseBlock {
    adjclose: Vec<Option<f64>>,
}

/// Client for the provider's chart API.
pub struct HistoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl HistoryClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0")
            .build()?;

        Ok(Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            client,
        })
    }

    /// Fetch the daily history for one symbol over a closed date range.
    ///
    /// Rows the provider reports only partially are kept with NaN fields
    /// so the quality layer can repair them. Rows with no usable price at
    /// all are dropped.
    pub async fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, FetchError> {
        let period1 = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default();
        let period2 = end
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default();

        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&period1={}&period2={}&events=history",
            self.base_url, symbol, period1, period2
        );

        info!("fetching daily history for {} from provider", symbol);
        debug!("request url: {}", url);

        let response: ChartResponse = self.client.get(&url).send().await?.json().await?;

        if let Some(error) = response.chart.error {
            return Err(FetchError::Api {
                code: error.code,
                description: error.description,
            });
        }

        let data = response
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| FetchError::EmptyHistory {
                symbol: symbol.to_string(),
            })?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Decode("missing quote block".to_string()))?;

        // Prefer the adjusted close when the provider ships it; O/H/L are
        // scaled by the same per-row factor so the bars stay consistent
        // across splits and dividends.
        let adjclose = data.indicators.adjclose.into_iter().next();
        match &adjclose {
            Some(_) => info!("using split/dividend-adjusted prices"),
            None => info!("no adjusted close block, using raw quotes"),
        }

        let mut bars = Vec::with_capacity(data.timestamp.len());
        for (i, &ts) in data.timestamp.iter().enumerate() {
            let date = match DateTime::from_timestamp(ts, 0) {
                Some(dt) => dt.date_naive(),
                None => continue,
            };

            let raw_close = field(&quote.close, i);
            let adj = adjclose
                .as_ref()
                .map(|block| field(&block.adjclose, i))
                .unwrap_or(f64::NAN);
            let factor = adjust_factor(adj, raw_close);

            let close = raw_close * factor;
            let open = field(&quote.open, i) * factor;
            let high = field(&quote.high, i) * factor;
            let low = field(&quote.low, i) * factor;
            let volume = quote
                .volume
                .get(i)
                .and_then(|v| *v)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);

            // A row with no price information at all carries nothing to repair.
            if close.is_nan() && open.is_nan() && high.is_nan() && low.is_nan() {
                continue;
            }

            bars.push(DailyBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        if bars.is_empty() {
            return Err(FetchError::EmptyHistory {
                symbol: symbol.to_string(),
            });
        }

        info!("fetched {} trading days for {}", bars.len(), symbol);
        Ok(bars)
    }
}

fn field(values: &[Option<f64>], i: usize) -> f64 {
    values.get(i).and_then(|v| *v).unwrap_or(f64::NAN)
}

/// Per-row split/dividend adjustment ratio; 1.0 when either side is unusable.
fn adjust_factor(adj: f64, raw_close: f64) -> f64 {
    if adj.is_nan() || raw_close.is_nan() || raw_close == 0.0 {
        1.0
    } else {
        adj / raw_close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_chart_response() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1262563200, 1262649600],
                    "indicators": {
                        "quote": [{
                            "open": [30.6, null],
                            "high": [31.1, 31.0],
                            "low": [30.3, 30.5],
                            "close": [30.95, 30.96],
                            "volume": [38409100, 49749600]
                        }],
                        "adjclose": [{ "adjclose": [23.5, 23.51] }]
                    }
                }],
                "error": null
            }
        }"#;

        let parsed: ChartResponse = serde_json::from_str(body).unwrap();
        let data = parsed.chart.result.unwrap().into_iter().next().unwrap();
        assert_eq!(data.timestamp.len(), 2);
        assert_eq!(data.indicators.quote[0].open[1], None);
        assert_eq!(data.indicators.adjclose[0].adjclose[0], Some(23.5));
    }

    #[test]
    fn test_decode_api_error() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found" }
            }
        }"#;

        let parsed: ChartResponse = serde_json::from_str(body).unwrap();
        let error = parsed.chart.error.unwrap();
        assert_eq!(error.code, "Not Found");
    }

    #[test]
    fn test_partial_row_becomes_nan() {
        let values = vec![Some(1.0), None];
        assert_eq!(field(&values, 0), 1.0);
        assert!(field(&values, 1).is_nan());
        assert!(field(&values, 5).is_nan());
    }

    #[test]
    fn test_adjust_factor_falls_back_to_raw() {
        assert!((adjust_factor(23.5, 47.0) - 0.5).abs() < 1e-12);
        assert_eq!(adjust_factor(f64::NAN, 47.0), 1.0);
        assert_eq!(adjust_factor(23.5, f64::NAN), 1.0);
        assert_eq!(adjust_factor(23.5, 0.0), 1.0);
    }
}
