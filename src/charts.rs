//! Terminal chart rendering (text-based for terminal output).

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::analysis::kpi::{PerformanceKpis, RiskKpis, TrendKpis};
use crate::analysis::scoring::ScoreCard;
use crate::indicators::EnrichedSeries;
use crate::utils::format_date;

/// Plot glyphs assigned to series in declaration order.
const GLYPHS: [char; 4] = ['*', 'o', '+', 'x'];

const CHART_WIDTH: usize = 100;
const CHART_HEIGHT: usize = 20;

/// Where the KPI dashboard panel is written.
pub const DASHBOARD_FILE: &str = "dashboard_kpi.txt";

/// Print a multi-series ASCII line chart. Each series is downsampled to the
/// chart width; NaN points are skipped.
pub fn print_line_chart(title: &str, series: &[(&str, &[f64])]) {
    println!("\n{}", title);
    println!("{}", "=".repeat(title.len()));

    let n = series.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    if n == 0 {
        println!("(no data)");
        return;
    }

    let mut min_val = f64::INFINITY;
    let mut max_val = f64::NEG_INFINITY;
    for (_, values) in series {
        for &v in values.iter().filter(|v| !v.is_nan()) {
            min_val = min_val.min(v);
            max_val = max_val.max(v);
        }
    }
    if !min_val.is_finite() {
        println!("(no defined points)");
        return;
    }
    let range = if (max_val - min_val).abs() > 1e-10 {
        max_val - min_val
    } else {
        1.0
    };

    let mut grid = vec![vec![' '; CHART_WIDTH]; CHART_HEIGHT];
    for (s, (_, values)) in series.iter().enumerate() {
        let glyph = GLYPHS[s % GLYPHS.len()];
        for col in 0..CHART_WIDTH {
            let idx = col * (n - 1).max(1) / (CHART_WIDTH - 1).max(1);
            if idx >= values.len() {
                continue;
            }
            let v = values[idx];
            if v.is_nan() {
                continue;
            }
            let normalized = (v - min_val) / range;
            let row = ((1.0 - normalized) * (CHART_HEIGHT - 1) as f64).round() as usize;
            grid[row.min(CHART_HEIGHT - 1)][col] = glyph;
        }
    }

    for (row, line) in grid.iter().enumerate() {
        let label = if row == 0 {
            format!("{:>10.2}", max_val)
        } else if row == CHART_HEIGHT - 1 {
            format!("{:>10.2}", min_val)
        } else {
            " ".repeat(10)
        };
        println!("{} | {}", label, line.iter().collect::<String>());
    }
    println!("{} +-{}", " ".repeat(10), "-".repeat(CHART_WIDTH));

    let legend = series
        .iter()
        .enumerate()
        .map(|(s, (name, _))| format!("{} {}", GLYPHS[s % GLYPHS.len()], name))
        .collect::<Vec<_>>()
        .join("   ");
    println!("{}   {}", " ".repeat(10), legend);
}

/// Print a signed horizontal bar chart, bars growing left or right of a
/// zero axis.
pub fn print_signed_bar_chart(title: &str, labels: &[String], values: &[f64], width: usize) {
    println!("\n{}", title);
    println!("{}", "=".repeat(title.len()));

    let max_abs = values
        .iter()
        .fold(0.0f64, |a, &b| if b.abs() > a { b.abs() } else { a });
    if max_abs < 1e-10 {
        println!("(all zero)");
        return;
    }

    let half = width / 2;
    let max_label_len = labels.iter().map(|s| s.len()).max().unwrap_or(4);

    for (label, &value) in labels.iter().zip(values.iter()) {
        let bar_len = (value.abs() / max_abs * half as f64) as usize;
        let (left, right) = if value < 0.0 {
            (
                format!("{:>half$}", "#".repeat(bar_len), half = half),
                String::new(),
            )
        } else {
            (" ".repeat(half), "#".repeat(bar_len))
        };
        println!(
            "{:>width$} {}|{:<half$} {:>8.2}%",
            label,
            left,
            right,
            value,
            width = max_label_len,
            half = half
        );
    }
}

/// Print a histogram of values over a fixed number of equal-width bins.
pub fn print_histogram(title: &str, values: &[f64], bins: usize, width: usize) {
    println!("\n{}", title);
    println!("{}", "=".repeat(title.len()));

    let clean: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if clean.is_empty() || bins == 0 {
        println!("(no data)");
        return;
    }

    let min_val = clean.iter().copied().fold(f64::INFINITY, f64::min);
    let max_val = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if (max_val - min_val).abs() > 1e-10 {
        max_val - min_val
    } else {
        1.0
    };
    let bin_width = range / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in &clean {
        let idx = (((v - min_val) / range) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or(1).max(1);

    for (i, &count) in counts.iter().enumerate() {
        let lo = min_val + i as f64 * bin_width;
        let hi = lo + bin_width;
        let bar_len = count * width / max_count;
        println!(
            "[{:>7.2}; {:>7.2}) | {:<width$} {}",
            lo,
            hi,
            "#".repeat(bar_len),
            count,
            width = width
        );
    }
}

/// Render the KPI dashboard panel as a string, for printing and for the
/// dashboard file.
pub fn render_dashboard(
    symbol: &str,
    perf: &PerformanceKpis,
    risk: &RiskKpis,
    trend: &TrendKpis,
    card: &ScoreCard,
) -> String {
    let mut out = String::new();
    let line = "=".repeat(64);

    out.push_str(&format!("{}\n", line));
    out.push_str(&format!(
        "  KPI DASHBOARD - {} ({} to {})\n",
        symbol,
        format_date(perf.first_date),
        format_date(perf.last_date)
    ));
    out.push_str(&format!("{}\n\n", line));

    out.push_str("  PERFORMANCE\n");
    out.push_str(&format!(
        "    Total return        {:>12.2} %\n",
        perf.total_return_pct
    ));
    out.push_str(&format!(
        "    Capital multiple    {:>12.2} x\n",
        perf.capital_multiple
    ));
    out.push_str(&format!("    CAGR                {:>12.2} %\n", perf.cagr_pct));
    out.push_str(&format!(
        "    Grade               {:>12}\n\n",
        card.performance_grade.to_string()
    ));

    out.push_str("  RISK\n");
    out.push_str(&format!(
        "    Annualized vol      {:>12.2} %\n",
        risk.annualized_volatility_pct
    ));
    out.push_str(&format!(
        "    Sharpe ratio        {:>12.2}\n",
        risk.sharpe_ratio
    ));
    out.push_str(&format!(
        "    VaR 95% (daily)     {:>12.2} %\n",
        risk.var_95_daily_pct
    ));
    out.push_str(&format!(
        "    Max drawdown        {:>12.2} %\n",
        risk.max_drawdown_pct
    ));
    out.push_str(&format!(
        "    Risk level          {:>12}\n\n",
        card.risk_level.to_string()
    ));

    out.push_str("  TREND\n");
    out.push_str(&format!(
        "    Close vs SMA200     {:>12.2} %\n",
        trend.gap_sma_200_pct
    ));
    out.push_str(&format!(
        "    Golden cross        {:>12}\n",
        if trend.golden_cross { "yes" } else { "no" }
    ));
    out.push_str(&format!(
        "    Distance to ATH     {:>12.2} %\n\n",
        trend.distance_to_ath_pct
    ));

    out.push_str("  SCORES\n");
    out.push_str(&format!(
        "    Performance         {:>12.1} / 10\n",
        card.performance_score
    ));
    out.push_str(&format!(
        "    Risk                {:>12.1} / 10\n",
        card.risk_score
    ));
    out.push_str(&format!(
        "    Technical           {:>12.1} / 10\n",
        card.technical_score
    ));
    out.push_str(&format!(
        "    Composite           {:>12.2} / 10\n",
        card.composite
    ));
    out.push_str(&format!(
        "    Verdict             {:>12}\n",
        card.verdict.to_string()
    ));
    out.push_str(&format!(
        "    Recommendation      {:>12}\n",
        card.recommendation.to_string()
    ));
    out.push_str(&format!("{}\n", line));

    out
}

/// Write the dashboard panel next to the working directory.
pub fn save_dashboard(panel: &str) -> anyhow::Result<()> {
    std::fs::write(Path::new(DASHBOARD_FILE), panel)
        .with_context(|| format!("Failed to write {}", DASHBOARD_FILE))?;
    info!("dashboard panel written to {}", DASHBOARD_FILE);
    Ok(())
}

/// The fixed chart sequence printed after the analysis sections.
pub fn print_chart_sequence(symbol: &str, series: &EnrichedSeries, yearly: &[(i32, f64)]) {
    print_line_chart(
        &format!("{} - Close and moving averages", symbol),
        &[
            ("Close", &series.close),
            ("SMA 50", &series.sma_50),
            ("SMA 200", &series.sma_200),
        ],
    );

    let labels: Vec<String> = yearly.iter().map(|(y, _)| y.to_string()).collect();
    let values: Vec<f64> = yearly.iter().map(|(_, r)| *r).collect();
    print_signed_bar_chart(
        &format!("{} - Returns by year", symbol),
        &labels,
        &values,
        60,
    );

    print_line_chart(
        &format!("{} - Rolling 30d volatility of daily returns", symbol),
        &[("Vol 30d", &series.volatility_30d)],
    );

    print_line_chart(
        &format!("{} - Drawdown from running maximum", symbol),
        &[("Drawdown %", &series.drawdown_pct)],
    );

    print_line_chart(
        &format!("{} - Value of 10,000 invested at the start", symbol),
        &[("Portfolio", &series.portfolio_value)],
    );

    print_histogram(
        &format!("{} - Daily return distribution", symbol),
        &series.daily_return_pct,
        20,
        50,
    );
}
