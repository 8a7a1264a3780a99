//! The enriched price table: raw OHLCV columns plus every derived column,
//! computed once for the whole pipeline.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::fetch::DailyBar;
use crate::indicators::ta::{Next, RollingStdDev, RunningMaximum, SimpleMovingAverage};

/// Rolling volatility window sizes, in trading days.
pub const VOLATILITY_WINDOWS: [usize; 2] = [30, 90];
/// Simple moving average window sizes, in trading days.
pub const SMA_WINDOWS: [usize; 3] = [20, 50, 200];
/// Hypothetical amount invested at the first close, for the portfolio column.
pub const INITIAL_INVESTMENT: f64 = 10_000.0;

/// Time-indexed price table, one row per trading day, columns stored as
/// parallel vectors. Derived columns hold NaN where they are undefined
/// (first row for returns, warm-up region for windowed columns).
#[derive(Debug, Clone)]
pub struct EnrichedSeries {
    pub dates: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,

    pub daily_return_pct: Vec<f64>,
    pub cumulative_return_pct: Vec<f64>,
    pub log_return: Vec<f64>,

    pub year: Vec<i32>,
    pub month: Vec<u32>,
    pub weekday: Vec<u32>,
    pub quarter: Vec<u32>,

    pub volatility_30d: Vec<f64>,
    pub volatility_90d: Vec<f64>,
    pub daily_range_pct: Vec<f64>,

    pub sma_20: Vec<f64>,
    pub sma_50: Vec<f64>,
    pub sma_200: Vec<f64>,

    pub running_max: Vec<f64>,
    pub drawdown_pct: Vec<f64>,
    pub portfolio_value: Vec<f64>,
}

impl EnrichedSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Index of the last row.
    pub fn last(&self) -> usize {
        self.len() - 1
    }

    /// Daily returns with the undefined first row stripped.
    pub fn defined_returns(&self) -> Vec<f64> {
        self.daily_return_pct
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .collect()
    }
}

/// Build every derived column from the cleaned bar list in one pass set.
///
/// This is the single place column derivation happens; callers must not
/// recompute any of these elsewhere.
pub fn enrich(bars: &[DailyBar]) -> anyhow::Result<EnrichedSeries> {
    let n = bars.len();
    let first_close = bars.first().map(|b| b.close).unwrap_or(f64::NAN);

    let mut series = EnrichedSeries {
        dates: Vec::with_capacity(n),
        open: Vec::with_capacity(n),
        high: Vec::with_capacity(n),
        low: Vec::with_capacity(n),
        close: Vec::with_capacity(n),
        volume: Vec::with_capacity(n),
        daily_return_pct: Vec::with_capacity(n),
        cumulative_return_pct: Vec::with_capacity(n),
        log_return: Vec::with_capacity(n),
        year: Vec::with_capacity(n),
        month: Vec::with_capacity(n),
        weekday: Vec::with_capacity(n),
        quarter: Vec::with_capacity(n),
        volatility_30d: Vec::with_capacity(n),
        volatility_90d: Vec::with_capacity(n),
        daily_range_pct: Vec::with_capacity(n),
        sma_20: Vec::with_capacity(n),
        sma_50: Vec::with_capacity(n),
        sma_200: Vec::with_capacity(n),
        running_max: Vec::with_capacity(n),
        drawdown_pct: Vec::with_capacity(n),
        portfolio_value: Vec::with_capacity(n),
    };

    let mut vol_30 = RollingStdDev::new(VOLATILITY_WINDOWS[0])?;
    let mut vol_90 = RollingStdDev::new(VOLATILITY_WINDOWS[1])?;
    let mut sma_20 = SimpleMovingAverage::new(SMA_WINDOWS[0])?;
    let mut sma_50 = SimpleMovingAverage::new(SMA_WINDOWS[1])?;
    let mut sma_200 = SimpleMovingAverage::new(SMA_WINDOWS[2])?;
    let mut running_max = RunningMaximum::new();

    let mut prev_close = f64::NAN;
    for bar in bars {
        series.dates.push(bar.date);
        series.open.push(bar.open);
        series.high.push(bar.high);
        series.low.push(bar.low);
        series.close.push(bar.close);
        series.volume.push(bar.volume);

        let daily_return = (bar.close / prev_close - 1.0) * 100.0;
        series.daily_return_pct.push(daily_return);
        series
            .cumulative_return_pct
            .push((bar.close / first_close - 1.0) * 100.0);
        series.log_return.push((bar.close / prev_close).ln());

        series.year.push(bar.date.year());
        series.month.push(bar.date.month());
        series.weekday.push(bar.date.weekday().num_days_from_monday());
        series.quarter.push((bar.date.month() - 1) / 3 + 1);

        series.volatility_30d.push(vol_30.next(daily_return));
        series.volatility_90d.push(vol_90.next(daily_return));
        series
            .daily_range_pct
            .push((bar.high - bar.low) / bar.close * 100.0);

        series.sma_20.push(sma_20.next(bar.close));
        series.sma_50.push(sma_50.next(bar.close));
        series.sma_200.push(sma_200.next(bar.close));

        let peak = running_max.next(bar.close);
        series.running_max.push(peak);
        series.drawdown_pct.push((bar.close - peak) / peak * 100.0);

        series
            .portfolio_value
            .push(INITIAL_INVESTMENT * bar.close / first_close);

        prev_close = bar.close;
    }

    debug!("enriched table built: {} rows", series.len());
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrich_closes(bars: &[DailyBar]) -> EnrichedSeries {
        enrich(bars).unwrap()
    }

    pub(crate) fn bars_from_closes(closes: &[f64]) -> Vec<DailyBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| DailyBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close * 1.02,
                low: close * 0.98,
                close,
                volume: 1_000_000.0,
            })
            .collect()
    }

    #[test]
    fn test_reference_scenario_returns_and_drawdown() {
        // Close = [100, 105, 95, 110]
        let series = enrich_closes(&bars_from_closes(&[100.0, 105.0, 95.0, 110.0]));

        assert!(series.daily_return_pct[0].is_nan());
        assert!((series.daily_return_pct[1] - 5.0).abs() < 1e-9);
        assert!((series.cumulative_return_pct[3] - 10.0).abs() < 1e-9);
        assert_eq!(series.running_max, vec![100.0, 105.0, 105.0, 110.0]);
        assert!((series.drawdown_pct[2] - (95.0 - 105.0) / 105.0 * 100.0).abs() < 1e-9);
        assert!((series.drawdown_pct[2] - -9.523809523809524).abs() < 1e-6);
    }

    #[test]
    fn test_cumulative_return_starts_at_zero() {
        let series = enrich_closes(&bars_from_closes(&[42.0, 43.0, 44.0]));
        assert_eq!(series.cumulative_return_pct[0], 0.0);
    }

    #[test]
    fn test_drawdown_never_positive_and_peak_covers_close() {
        let series = enrich_closes(&bars_from_closes(&[
            100.0, 101.0, 99.0, 104.0, 90.0, 95.0, 120.0, 80.0,
        ]));
        for i in 0..series.len() {
            assert!(series.drawdown_pct[i] <= 1e-12);
            assert!(series.running_max[i] >= series.close[i]);
            if i > 0 {
                assert!(series.running_max[i] >= series.running_max[i - 1]);
            }
        }
    }

    #[test]
    fn test_log_returns_sum_to_full_period_log_return() {
        let closes = [100.0, 103.0, 101.0, 108.0, 97.0, 111.0];
        let series = enrich_closes(&bars_from_closes(&closes));
        let total: f64 = series.log_return.iter().filter(|v| !v.is_nan()).sum();
        let expected = (closes[closes.len() - 1] / closes[0]).ln();
        assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn test_windowed_columns_warm_up_with_nan() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let series = enrich_closes(&bars_from_closes(&closes));

        // SMA 20 defined from row 19 on.
        assert!(series.sma_20[18].is_nan());
        assert!(!series.sma_20[19].is_nan());

        // Volatility window runs over returns, which start at row 1, so the
        // first defined value lands one row later than for price windows.
        assert!(series.volatility_30d[29].is_nan());
        assert!(!series.volatility_30d[30].is_nan());

        // Not enough rows for SMA 200 here.
        assert!(series.sma_200.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_portfolio_value_tracks_close() {
        let series = enrich_closes(&bars_from_closes(&[50.0, 55.0, 60.0]));
        assert!((series.portfolio_value[0] - INITIAL_INVESTMENT).abs() < 1e-9);
        assert!((series.portfolio_value[2] - 12_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_calendar_columns() {
        let bars = vec![DailyBar {
            date: NaiveDate::from_ymd_opt(2020, 11, 4).unwrap(), // a Wednesday
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 1.0,
        }];
        let series = enrich(&bars).unwrap();
        assert_eq!(series.year[0], 2020);
        assert_eq!(series.month[0], 11);
        assert_eq!(series.weekday[0], 2);
        assert_eq!(series.quarter[0], 4);
    }
}
