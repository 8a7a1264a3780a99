//! End-to-end pipeline test over a synthetic history: quality repair,
//! enrichment, KPIs, scoring, and report rendering, with no network.

use chrono::{Datelike, NaiveDate, Weekday};

use stock_analyzer::analysis::scoring::Recommendation;
use stock_analyzer::analysis::{kpi, scoring, stats};
use stock_analyzer::charts;
use stock_analyzer::fetch::DailyBar;
use stock_analyzer::indicators::enrich;
use stock_analyzer::quality::{audit, remediate};
use stock_analyzer::report::{executive, exploration};

/// Three years of weekday bars on a steady growth path with a mid-series
/// correction, plus injected quality defects.
fn synthetic_history() -> Vec<DailyBar> {
    let mut bars = Vec::new();
    let mut date = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
    let mut close = 100.0;
    let mut i = 0usize;

    while bars.len() < 760 {
        if date.weekday() != Weekday::Sat && date.weekday() != Weekday::Sun {
            // Growth with a drawdown between rows 300 and 360.
            let drift = if (300..360).contains(&i) { -0.004 } else { 0.0012 };
            let wobble = (i as f64 * 0.7).sin() * 0.004;
            close *= 1.0 + drift + wobble;

            bars.push(DailyBar {
                date,
                open: close * 0.998,
                high: close * 1.012,
                low: close * 0.988,
                close,
                volume: 1_000_000.0 + (i as f64 * 1.3).cos().abs() * 500_000.0,
            });
            i += 1;
        }
        date = date.succ_opt().unwrap();
    }

    // Inject defects the remediation pass must absorb.
    bars[10].close = f64::NAN;
    bars[20].volume = f64::NAN;
    let dup = bars[30].clone();
    bars.insert(31, dup);
    bars
}

#[test]
fn test_pipeline_end_to_end() {
    let raw = synthetic_history();
    let raw_len = raw.len();

    let quality = audit(&raw);
    assert_eq!(quality.missing_close, 1);
    assert_eq!(quality.missing_volume, 1);
    assert_eq!(quality.duplicate_dates, 1);
    assert!(quality.weekend_gaps > 0);

    let bars = remediate(raw);
    assert_eq!(bars.len(), raw_len - 1); // duplicate collapsed
    for bar in &bars {
        assert!(!bar.has_missing());
    }

    let series = enrich(&bars).unwrap();
    assert_eq!(series.len(), bars.len());

    // Structural invariants of the derived columns.
    assert_eq!(series.cumulative_return_pct[0], 0.0);
    for t in 0..series.len() {
        assert!(series.drawdown_pct[t] <= 1e-12);
        assert!(series.running_max[t] >= series.close[t] - 1e-12);
        if t > 0 {
            assert!(series.running_max[t] >= series.running_max[t - 1]);
        }
    }
    let log_sum: f64 = series.log_return.iter().filter(|v| !v.is_nan()).sum();
    let expected = (series.close[series.last()] / series.close[0]).ln();
    assert!((log_sum - expected).abs() < 1e-9);

    let perf = kpi::performance(&series);
    let risk = kpi::risk(&series, &perf);
    let trend = kpi::trend(&series);

    // The history grows overall, so growth KPIs must be positive and the
    // injected correction must show up as the max drawdown.
    assert!(perf.total_return_pct > 0.0);
    assert!(perf.cagr_pct > 0.0);
    assert!(risk.max_drawdown_pct < -5.0);
    assert!(risk.annualized_volatility_pct > 0.0);
    assert!(trend.support_1y <= trend.resistance_1y);

    let card = scoring::score(&perf, &risk, &trend);
    assert!((0.0..=10.0).contains(&card.composite));
    assert!(matches!(
        card.recommendation,
        Recommendation::Buy
            | Recommendation::GradualBuy
            | Recommendation::Hold
            | Recommendation::Wait
    ));

    // Report and chart rendering must run cleanly over the same data.
    exploration::print_exploration("SYNTH", &quality, &series, &risk, &trend);
    let yearly = stats::yearly_returns(&series);
    charts::print_chart_sequence("SYNTH", &series, &yearly);
    executive::print_executive("SYNTH", &series, &perf, &risk, &trend, &card);

    let panel = charts::render_dashboard("SYNTH", &perf, &risk, &trend, &card);
    assert!(panel.contains("Recommendation"));
}

#[test]
fn test_cagr_consistent_from_two_start_points() {
    let bars = synthetic_history();
    let bars = remediate(bars);
    let series = enrich(&bars).unwrap();

    let perf_full = kpi::performance(&series);

    // Recompute from a later start: the closed formula must hold there too.
    let later: Vec<DailyBar> = bars[252..].to_vec();
    let series_later = enrich(&later).unwrap();
    let perf_later = kpi::performance(&series_later);

    for perf in [&perf_full, &perf_later] {
        let expected =
            ((perf.last_close / perf.first_close).powf(1.0 / perf.years) - 1.0) * 100.0;
        assert!((perf.cagr_pct - expected).abs() < 1e-9);
    }
}
