//! Key performance indicators: growth, risk, and trend state of the series.

use chrono::NaiveDate;
use statrs::statistics::{Data, OrderStatistics};
use tracing::debug;

use crate::indicators::{EnrichedSeries, INITIAL_INVESTMENT};

/// Trading days per year, the annualization base.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
/// Annual risk-free rate assumed for the Sharpe ratio, in percent.
pub const RISK_FREE_RATE_PCT: f64 = 3.0;
/// A drawdown above this level counts as recovered.
const RECOVERY_THRESHOLD_PCT: f64 = -0.5;

/// Growth-side indicators over the full period and trailing windows.
#[derive(Debug, Clone)]
pub struct PerformanceKpis {
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub first_close: f64,
    pub last_close: f64,
    pub total_return_pct: f64,
    pub capital_multiple: f64,
    /// Years between first and last row, calendar days / 365.25.
    pub years: f64,
    pub cagr_pct: f64,
    /// Trailing (return %, CAGR %) over roughly 1, 5, and 10 years of
    /// trading days, None when the history is too short.
    pub trailing_1y: Option<(f64, f64)>,
    pub trailing_5y: Option<(f64, f64)>,
    pub trailing_10y: Option<(f64, f64)>,
    pub portfolio_final: f64,
    pub portfolio_gain: f64,
}

/// Dispersion and loss indicators.
#[derive(Debug, Clone)]
pub struct RiskKpis {
    pub daily_volatility_pct: f64,
    pub annualized_volatility_pct: f64,
    pub sharpe_ratio: f64,
    /// 5th percentile of daily returns.
    pub var_95_daily_pct: f64,
    /// Daily VaR scaled by sqrt(21) to a one-month horizon.
    pub var_95_monthly_pct: f64,
    pub return_risk_ratio: f64,
    pub max_drawdown_pct: f64,
    pub max_drawdown_date: NaiveDate,
    pub peak_price: f64,
    pub trough_price: f64,
    /// Calendar days from the trough to the first row back within
    /// RECOVERY_THRESHOLD_PCT of the peak, None if never recovered.
    pub recovery_days: Option<i64>,
}

/// Direction of the most recent SMA50/SMA200 crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossKind {
    Golden,
    Death,
}

/// Moving-average posture of the latest row.
#[derive(Debug, Clone)]
pub struct TrendKpis {
    pub last_close: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub sma_200: f64,
    /// Close vs each SMA, in percent of the SMA.
    pub gap_sma_20_pct: f64,
    pub gap_sma_50_pct: f64,
    pub gap_sma_200_pct: f64,
    /// True while SMA50 sits above SMA200.
    pub golden_cross: bool,
    pub last_cross: Option<(NaiveDate, CrossKind)>,
    pub all_time_high: f64,
    pub distance_to_ath_pct: f64,
    /// Min and max close over the trailing 252 rows.
    pub support_1y: f64,
    pub resistance_1y: f64,
}

/// CAGR in percent for a price multiple held over `years` years.
pub fn cagr_pct(first: f64, last: f64, years: f64) -> f64 {
    if years <= 0.0 || first <= 0.0 {
        return f64::NAN;
    }
    ((last / first).powf(1.0 / years) - 1.0) * 100.0
}

pub fn performance(series: &EnrichedSeries) -> PerformanceKpis {
    let last = series.last();
    let first_close = series.close[0];
    let last_close = series.close[last];
    let days = (series.dates[last] - series.dates[0]).num_days();
    let years = days as f64 / 365.25;

    let trailing = |rows: usize| -> Option<(f64, f64)> {
        if series.len() <= rows {
            return None;
        }
        let start = series.close[series.len() - 1 - rows];
        let ret = (last_close / start - 1.0) * 100.0;
        // Trailing windows are measured in trading days.
        let window_years = rows as f64 / TRADING_DAYS_PER_YEAR;
        Some((ret, cagr_pct(start, last_close, window_years)))
    };

    let kpis = PerformanceKpis {
        first_date: series.dates[0],
        last_date: series.dates[last],
        first_close,
        last_close,
        total_return_pct: (last_close / first_close - 1.0) * 100.0,
        capital_multiple: last_close / first_close,
        years,
        cagr_pct: cagr_pct(first_close, last_close, years),
        trailing_1y: trailing(252),
        trailing_5y: trailing(252 * 5),
        trailing_10y: trailing(252 * 10),
        portfolio_final: series.portfolio_value[last],
        portfolio_gain: series.portfolio_value[last] - INITIAL_INVESTMENT,
    };
    debug!(cagr = kpis.cagr_pct, "performance KPIs computed");
    kpis
}

pub fn risk(series: &EnrichedSeries, perf: &PerformanceKpis) -> RiskKpis {
    let returns = series.defined_returns();
    let n = returns.len() as f64;
    let mean_daily = returns.iter().sum::<f64>() / n;
    let daily_vol = if n > 1.0 {
        let var = returns.iter().map(|r| (r - mean_daily).powi(2)).sum::<f64>() / (n - 1.0);
        var.sqrt()
    } else {
        f64::NAN
    };
    let annualized_vol = daily_vol * TRADING_DAYS_PER_YEAR.sqrt();

    let mut data = Data::new(returns);
    let var_95_daily = data.percentile(5);

    // Deepest drawdown and where it happened.
    let mut trough_idx = 0usize;
    for i in 0..series.len() {
        if series.drawdown_pct[i] < series.drawdown_pct[trough_idx] {
            trough_idx = i;
        }
    }
    let recovery_days = (trough_idx + 1..series.len())
        .find(|&i| series.drawdown_pct[i] >= RECOVERY_THRESHOLD_PCT)
        .map(|i| (series.dates[i] - series.dates[trough_idx]).num_days());

    RiskKpis {
        daily_volatility_pct: daily_vol,
        annualized_volatility_pct: annualized_vol,
        sharpe_ratio: (mean_daily * TRADING_DAYS_PER_YEAR - RISK_FREE_RATE_PCT) / annualized_vol,
        var_95_daily_pct: var_95_daily,
        var_95_monthly_pct: var_95_daily * 21.0_f64.sqrt(),
        return_risk_ratio: perf.cagr_pct / annualized_vol,
        max_drawdown_pct: series.drawdown_pct[trough_idx],
        max_drawdown_date: series.dates[trough_idx],
        peak_price: series.running_max[trough_idx],
        trough_price: series.close[trough_idx],
        recovery_days,
    }
}

pub fn trend(series: &EnrichedSeries) -> TrendKpis {
    let last = series.last();
    let close = series.close[last];
    let sma_20 = series.sma_20[last];
    let sma_50 = series.sma_50[last];
    let sma_200 = series.sma_200[last];

    // Most recent SMA50/SMA200 crossover, scanning backwards over rows
    // where both averages are defined.
    let mut last_cross = None;
    for i in (1..series.len()).rev() {
        let (s50_prev, s200_prev) = (series.sma_50[i - 1], series.sma_200[i - 1]);
        let (s50, s200) = (series.sma_50[i], series.sma_200[i]);
        if s50_prev.is_nan() || s200_prev.is_nan() || s50.is_nan() || s200.is_nan() {
            continue;
        }
        if s50_prev <= s200_prev && s50 > s200 {
            last_cross = Some((series.dates[i], CrossKind::Golden));
            break;
        }
        if s50_prev >= s200_prev && s50 < s200 {
            last_cross = Some((series.dates[i], CrossKind::Death));
            break;
        }
    }

    let ath = series.running_max[last];
    let window_start = series.len().saturating_sub(252);
    let mut support = f64::INFINITY;
    let mut resistance = f64::NEG_INFINITY;
    for &c in &series.close[window_start..] {
        support = support.min(c);
        resistance = resistance.max(c);
    }

    TrendKpis {
        last_close: close,
        sma_20,
        sma_50,
        sma_200,
        gap_sma_20_pct: (close / sma_20 - 1.0) * 100.0,
        gap_sma_50_pct: (close / sma_50 - 1.0) * 100.0,
        gap_sma_200_pct: (close / sma_200 - 1.0) * 100.0,
        golden_cross: sma_50 > sma_200,
        last_cross,
        all_time_high: ath,
        distance_to_ath_pct: (close / ath - 1.0) * 100.0,
        support_1y: support,
        resistance_1y: resistance,
    }
}
