//! Data-quality audit and silent remediation of the raw bar list.
//!
//! Anomalies are counted and reported, never raised: duplicate dates keep
//! their first occurrence, a missing close is linearly interpolated, and
//! every other missing field is forward-filled.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::fetch::DailyBar;

/// Outcome of auditing the raw table before remediation.
#[derive(Debug, Clone, Default)]
pub struct QualityReport {
    pub rows: usize,
    pub missing_open: usize,
    pub missing_high: usize,
    pub missing_low: usize,
    pub missing_close: usize,
    pub missing_volume: usize,
    pub duplicate_dates: usize,
    pub high_below_low: usize,
    pub close_outside_range: usize,
    pub open_outside_range: usize,
    pub nonpositive_volume: usize,
    /// Distribution of day gaps between consecutive dates: (gap, occurrences).
    pub gap_distribution: Vec<(i64, usize)>,
    /// Regular weekend gaps (3 calendar days).
    pub weekend_gaps: usize,
    /// Gaps above 4 calendar days (holidays aside, worth a look).
    pub abnormal_gaps: Vec<(NaiveDate, i64)>,
}

impl QualityReport {
    pub fn missing_total(&self) -> usize {
        self.missing_open
            + self.missing_high
            + self.missing_low
            + self.missing_close
            + self.missing_volume
    }

    /// Total count of flagged anomalies (missing values excluded).
    pub fn anomaly_total(&self) -> usize {
        self.duplicate_dates
            + self.high_below_low
            + self.close_outside_range
            + self.open_outside_range
            + self.nonpositive_volume
    }
}

/// Audit the raw table: missing values, duplicate dates, OHLC consistency,
/// volume sanity and the calendar-gap survey.
pub fn audit(bars: &[DailyBar]) -> QualityReport {
    let mut report = QualityReport {
        rows: bars.len(),
        ..Default::default()
    };

    let mut prev_date: Option<NaiveDate> = None;
    let mut gaps: Vec<(i64, usize)> = Vec::new();

    for bar in bars {
        if bar.open.is_nan() {
            report.missing_open += 1;
        }
        if bar.high.is_nan() {
            report.missing_high += 1;
        }
        if bar.low.is_nan() {
            report.missing_low += 1;
        }
        if bar.close.is_nan() {
            report.missing_close += 1;
        }
        if bar.volume.is_nan() {
            report.missing_volume += 1;
        }

        // OHLC consistency on fully populated fields only.
        if bar.high < bar.low {
            report.high_below_low += 1;
        }
        if bar.close > bar.high || bar.close < bar.low {
            report.close_outside_range += 1;
        }
        if bar.open > bar.high || bar.open < bar.low {
            report.open_outside_range += 1;
        }
        if bar.volume <= 0.0 {
            report.nonpositive_volume += 1;
        }

        if let Some(prev) = prev_date {
            if bar.date == prev {
                report.duplicate_dates += 1;
            } else {
                let gap = (bar.date - prev).num_days();
                match gaps.iter_mut().find(|(g, _)| *g == gap) {
                    Some((_, count)) => *count += 1,
                    None => gaps.push((gap, 1)),
                }
                if gap == 3 {
                    report.weekend_gaps += 1;
                } else if gap > 4 {
                    report.abnormal_gaps.push((bar.date, gap));
                }
            }
        }
        prev_date = Some(bar.date);
    }

    gaps.sort_by_key(|(gap, _)| *gap);
    report.gap_distribution = gaps;

    debug!(
        "quality audit: {} rows, {} missing values, {} anomalies",
        report.rows,
        report.missing_total(),
        report.anomaly_total()
    );

    report
}

/// Repair the table in place of raising: sort ascending, collapse duplicate
/// dates onto their first occurrence, interpolate the close, forward-fill
/// the rest. The result is strictly ordered with no missing values.
pub fn remediate(mut bars: Vec<DailyBar>) -> Vec<DailyBar> {
    bars.sort_by_key(|b| b.date);

    let before = bars.len();
    let mut seen: Option<NaiveDate> = None;
    bars.retain(|b| {
        let keep = seen != Some(b.date);
        seen = Some(b.date);
        keep
    });
    if bars.len() < before {
        info!("collapsed {} duplicate dates", before - bars.len());
    }

    interpolate_close(&mut bars);
    forward_fill(&mut bars);

    bars
}

/// Linear interpolation of missing closes between their nearest defined
/// neighbors; missing values at either edge copy the nearest defined close.
fn interpolate_close(bars: &mut [DailyBar]) {
    let n = bars.len();
    let mut i = 0;
    while i < n {
        if !bars[i].close.is_nan() {
            i += 1;
            continue;
        }

        // Run of NaN closes: [i, j)
        let mut j = i;
        while j < n && bars[j].close.is_nan() {
            j += 1;
        }

        let left = if i > 0 { Some(bars[i - 1].close) } else { None };
        let right = if j < n { Some(bars[j].close) } else { None };

        for (k, bar_idx) in (i..j).enumerate() {
            bars[bar_idx].close = match (left, right) {
                (Some(a), Some(b)) => {
                    let steps = (j - i + 1) as f64;
                    a + (b - a) * (k + 1) as f64 / steps
                }
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => f64::NAN,
            };
        }
        i = j;
    }
}

/// Forward-fill open/high/low/volume; leading gaps copy the first defined value.
fn forward_fill(bars: &mut [DailyBar]) {
    fill_column(bars, |b| &mut b.open);
    fill_column(bars, |b| &mut b.high);
    fill_column(bars, |b| &mut b.low);
    fill_column(bars, |b| &mut b.volume);
}

fn fill_column(bars: &mut [DailyBar], mut col: impl FnMut(&mut DailyBar) -> &mut f64) {
    let mut last_valid = f64::NAN;
    for bar in bars.iter_mut() {
        let v = col(bar);
        if v.is_nan() {
            *v = last_valid;
        } else {
            last_valid = *v;
        }
    }

    // Backfill a leading run from the first defined value.
    let mut first_valid = f64::NAN;
    for bar in bars.iter_mut() {
        let v = col(bar);
        if !v.is_nan() {
            first_valid = *v;
            break;
        }
    }
    for bar in bars.iter_mut() {
        let v = col(bar);
        if v.is_nan() {
            *v = first_valid;
        } else {
            break;
        }
    }
}
