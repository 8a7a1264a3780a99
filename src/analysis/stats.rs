//! Descriptive statistics over the enriched table.

use chrono::NaiveDate;
use statrs::statistics::{Data, Distribution, OrderStatistics};

use crate::indicators::EnrichedSeries;

/// Five-number-plus summary of one column, NaN rows excluded.
#[derive(Debug, Clone)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Self {
        let clean: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if clean.is_empty() {
            return Self {
                count: 0,
                mean: f64::NAN,
                median: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                q1: f64::NAN,
                q3: f64::NAN,
            };
        }

        let min = clean.iter().copied().fold(f64::INFINITY, f64::min);
        let max = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let count = clean.len();

        let mut data = Data::new(clean);
        Self {
            count,
            mean: data.mean().unwrap_or(f64::NAN),
            median: data.median(),
            std: data.std_dev().unwrap_or(f64::NAN),
            min,
            max,
            q1: data.lower_quartile(),
            q3: data.upper_quartile(),
        }
    }
}

/// Shape and extremes of the daily-return distribution.
#[derive(Debug, Clone)]
pub struct ReturnStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub best: (NaiveDate, f64),
    pub worst: (NaiveDate, f64),
    pub positive_days: usize,
    pub negative_days: usize,
    pub pct_positive: f64,
    pub skewness: f64,
    /// Excess kurtosis (normal distribution = 0), bias-adjusted.
    pub kurtosis: f64,
}

pub fn return_stats(series: &EnrichedSeries) -> ReturnStats {
    let mut best = (NaiveDate::MIN, f64::NEG_INFINITY);
    let mut worst = (NaiveDate::MAX, f64::INFINITY);
    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut clean = Vec::with_capacity(series.len());

    for (i, &r) in series.daily_return_pct.iter().enumerate() {
        if r.is_nan() {
            continue;
        }
        clean.push(r);
        if r > best.1 {
            best = (series.dates[i], r);
        }
        if r < worst.1 {
            worst = (series.dates[i], r);
        }
        if r > 0.0 {
            positive += 1;
        } else if r < 0.0 {
            negative += 1;
        }
    }

    let summary = Summary::from_values(&clean);
    let pct_positive = if clean.is_empty() {
        0.0
    } else {
        positive as f64 / clean.len() as f64 * 100.0
    };

    ReturnStats {
        mean: summary.mean,
        median: summary.median,
        std: summary.std,
        best,
        worst,
        positive_days: positive,
        negative_days: negative,
        pct_positive,
        skewness: skewness(&clean),
        kurtosis: excess_kurtosis(&clean),
    }
}

/// Bias-adjusted sample skewness (Fisher-Pearson g1 with the n/(n-1)(n-2)
/// correction, the convention spreadsheet and dataframe libraries report).
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n < 3.0 {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / n;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n;
    if m2 == 0.0 {
        return f64::NAN;
    }
    let g1 = m3 / m2.powf(1.5);
    (n * (n - 1.0)).sqrt() / (n - 2.0) * g1
}

/// Bias-adjusted excess kurtosis (same convention as `skewness`).
pub fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n < 4.0 {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / n;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let m4 = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / n;
    if m2 == 0.0 {
        return f64::NAN;
    }
    let g2 = m4 / (m2 * m2) - 3.0;
    ((n - 1.0) / ((n - 2.0) * (n - 3.0))) * ((n + 1.0) * g2 + 6.0)
}

/// Pearson correlation over rows where both columns are defined.
pub fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .map(|(&x, &y)| (x, y))
        .collect();
    let n = pairs.len() as f64;
    if n < 2.0 {
        return f64::NAN;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

/// Coefficient of variation, in percent.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let summary = Summary::from_values(values);
    if summary.mean == 0.0 {
        return f64::NAN;
    }
    summary.std / summary.mean * 100.0
}

/// Calendar-year returns: first close to last close within each year.
pub fn yearly_returns(series: &EnrichedSeries) -> Vec<(i32, f64)> {
    let mut out: Vec<(i32, f64)> = Vec::new();
    let mut start_idx = 0usize;

    for i in 0..series.len() {
        let year_changes = i + 1 == series.len() || series.year[i + 1] != series.year[i];
        if year_changes {
            // Single-row years carry no within-year return.
            if i > start_idx {
                let first = series.close[start_idx];
                let last = series.close[i];
                out.push((series.year[i], (last - first) / first * 100.0));
            }
            start_idx = i + 1;
        }
    }

    out
}

/// Sum of daily returns per calendar month (index 0 = January).
pub fn monthly_return_totals(series: &EnrichedSeries) -> [f64; 12] {
    let mut totals = [0.0f64; 12];
    for (i, &r) in series.daily_return_pct.iter().enumerate() {
        if !r.is_nan() {
            totals[(series.month[i] - 1) as usize] += r;
        }
    }
    totals
}

/// Mean daily return per weekday (index 0 = Monday .. 4 = Friday).
pub fn weekday_mean_returns(series: &EnrichedSeries) -> [f64; 5] {
    let mut sums = [0.0f64; 5];
    let mut counts = [0usize; 5];
    for (i, &r) in series.daily_return_pct.iter().enumerate() {
        let wd = series.weekday[i] as usize;
        if !r.is_nan() && wd < 5 {
            sums[wd] += r;
            counts[wd] += 1;
        }
    }
    let mut means = [f64::NAN; 5];
    for i in 0..5 {
        if counts[i] > 0 {
            means[i] = sums[i] / counts[i] as f64;
        }
    }
    means
}

/// Top-n rows by volume: (date, volume, daily return that day).
pub fn top_volume_days(series: &EnrichedSeries, n: usize) -> Vec<(NaiveDate, f64, f64)> {
    let mut rows: Vec<(NaiveDate, f64, f64)> = (0..series.len())
        .filter(|&i| !series.volume[i].is_nan())
        .map(|i| (series.dates[i], series.volume[i], series.daily_return_pct[i]))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));
    rows.truncate(n);
    rows
}

/// Days per year where 30d volatility ran above 1.5x its full-period mean.
pub fn high_volatility_days_per_year(series: &EnrichedSeries) -> Vec<(i32, usize)> {
    let mean = Summary::from_values(&series.volatility_30d).mean;
    let threshold = mean * 1.5;

    let mut out: Vec<(i32, usize)> = Vec::new();
    for i in 0..series.len() {
        let v = series.volatility_30d[i];
        if !v.is_nan() && v > threshold {
            let year = series.year[i];
            match out.iter_mut().find(|(y, _)| *y == year) {
                Some((_, count)) => *count += 1,
                None => out.push((year, 1)),
            }
        }
    }
    out
}

/// Extreme up and down days beyond +/-5%, strongest first.
pub fn extreme_days(series: &EnrichedSeries, n: usize) -> (Vec<(NaiveDate, f64)>, Vec<(NaiveDate, f64)>) {
    let mut ups: Vec<(NaiveDate, f64)> = Vec::new();
    let mut downs: Vec<(NaiveDate, f64)> = Vec::new();
    for (i, &r) in series.daily_return_pct.iter().enumerate() {
        if r.is_nan() {
            continue;
        }
        if r > 5.0 {
            ups.push((series.dates[i], r));
        } else if r < -5.0 {
            downs.push((series.dates[i], r));
        }
    }
    ups.sort_by(|a, b| b.1.total_cmp(&a.1));
    downs.sort_by(|a, b| a.1.total_cmp(&b.1));
    ups.truncate(n);
    downs.truncate(n);
    (ups, downs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::DailyBar;
    use crate::indicators::enrich;
    use chrono::Datelike;

    fn bars_from_closes(closes: &[f64]) -> Vec<DailyBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| DailyBar {
                date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close * 1.01,
                low: close * 0.99,
                close,
                volume: 1_000.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn test_summary_quartiles_and_median() {
        let s = Summary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(s.count, 5);
        assert!((s.median - 3.0).abs() < 1e-9);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert!((s.mean - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_skips_nan() {
        let s = Summary::from_values(&[f64::NAN, 2.0, 4.0]);
        assert_eq!(s.count, 2);
        assert!((s.mean - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_perfect_and_inverse() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        assert!((correlation(&xs, &ys) - 1.0).abs() < 1e-9);

        let zs = [8.0, 6.0, 4.0, 2.0];
        assert!((correlation(&xs, &zs) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_ignores_nan_pairs() {
        let xs = [1.0, f64::NAN, 3.0, 4.0];
        let ys = [2.0, 100.0, 6.0, 8.0];
        assert!((correlation(&xs, &ys) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_skewness_of_symmetric_data_is_zero() {
        let values = [-2.0, -1.0, 0.0, 1.0, 2.0];
        assert!(skewness(&values).abs() < 1e-9);
    }

    #[test]
    fn test_return_stats_counts_signs() {
        let series = enrich(&bars_from_closes(&[100.0, 110.0, 99.0, 99.0, 120.0])).unwrap();
        let stats = return_stats(&series);
        assert_eq!(stats.positive_days, 2);
        assert_eq!(stats.negative_days, 1);
        // Best day is 99 -> 120, +21.21%.
        assert!((stats.best.1 - (120.0 / 99.0 - 1.0) * 100.0).abs() < 1e-9);
        assert!((stats.worst.1 - -10.0).abs() < 1e-9);
    }

    #[test]
    fn test_yearly_returns_split_on_year_boundary() {
        let mut bars = bars_from_closes(&[100.0, 110.0]);
        bars.extend(bars_from_closes(&[200.0, 150.0]).into_iter().map(|mut b| {
            b.date = b.date.with_year(2024).unwrap();
            b
        }));
        let series = enrich(&bars).unwrap();
        let yearly = yearly_returns(&series);
        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly[0].0, 2023);
        assert!((yearly[0].1 - 10.0).abs() < 1e-9);
        assert!((yearly[1].1 + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_volume_days_sorted_descending() {
        let series = enrich(&bars_from_closes(&[100.0, 101.0, 102.0, 103.0])).unwrap();
        let top = top_volume_days(&series, 2);
        assert_eq!(top.len(), 2);
        assert!(top[0].1 >= top[1].1);
    }

    #[test]
    fn test_extreme_days_threshold() {
        let series = enrich(&bars_from_closes(&[100.0, 106.0, 100.0, 101.0])).unwrap();
        let (ups, downs) = extreme_days(&series, 5);
        assert_eq!(ups.len(), 1); // +6%
        assert_eq!(downs.len(), 1); // -5.66%
    }
}
