//! Data exploration sections: quality audit, descriptive statistics with
//! interpretations, temporal, volatility, trend, drawdown, correlations.

use crate::analysis::kpi::{CrossKind, RiskKpis, TrendKpis};
use crate::analysis::stats::{
    self, coefficient_of_variation, correlation, ReturnStats, Summary,
};
use crate::indicators::EnrichedSeries;
use crate::quality::QualityReport;
use crate::report::{banner, section};
use crate::utils::{format_date, format_volume};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const WEEKDAY_NAMES: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Print the whole exploration part in its fixed order.
pub fn print_exploration(
    symbol: &str,
    quality: &QualityReport,
    series: &EnrichedSeries,
    risk: &RiskKpis,
    trend: &TrendKpis,
) {
    banner(&format!("DATA EXPLORATION - {}", symbol));

    print_quality(quality);
    print_descriptive(series);
    print_temporal(series);
    print_volatility(series);
    print_trend(trend);
    print_drawdown(series, risk);
    print_correlations(series);
}

pub fn print_quality(quality: &QualityReport) {
    section("DATA QUALITY");

    println!("\n   Rows                       : {}", quality.rows);
    println!("   Missing values (total)     : {}", quality.missing_total());
    println!(
        "     Open {} / High {} / Low {} / Close {} / Volume {}",
        quality.missing_open,
        quality.missing_high,
        quality.missing_low,
        quality.missing_close,
        quality.missing_volume
    );
    println!("   Duplicate dates            : {}", quality.duplicate_dates);
    println!("   High below Low             : {}", quality.high_below_low);
    println!("   Close outside [Low, High]  : {}", quality.close_outside_range);
    println!("   Open outside [Low, High]   : {}", quality.open_outside_range);
    println!("   Non-positive volume        : {}", quality.nonpositive_volume);

    println!("\n   Gaps between consecutive rows:");
    for &(days, count) in &quality.gap_distribution {
        let note = if days == 1 {
            ""
        } else if days == 3 {
            "  (weekends)"
        } else if days > 4 {
            "  (abnormal)"
        } else {
            "  (holidays)"
        };
        println!("     {} day(s): {} occurrence(s){}", days, count, note);
    }
    if !quality.abnormal_gaps.is_empty() {
        println!("\n   Abnormal gaps (> 4 days):");
        for &(date, days) in &quality.abnormal_gaps {
            println!("     {} : {} days without data", format_date(date), days);
        }
    }

    if quality.missing_total() == 0 && quality.anomaly_total() == 0 {
        println!("\n   [OK] No remaining quality issue.");
    }
}

pub fn print_descriptive(series: &EnrichedSeries) {
    section("DESCRIPTIVE STATISTICS");

    println!("\nCLOSE PRICE:\n");
    let close = Summary::from_values(&series.close);
    print_summary(&close, "$");
    println!(
        "\n   -> Over the period the close ranged from ${:.2} to ${:.2}, a x{:.1} span.",
        close.min,
        close.max,
        close.max / close.min
    );

    println!("\nVOLUME:\n");
    let volume = Summary::from_values(&series.volume);
    print_summary_volume(&volume);
    println!(
        "\n   Coefficient of variation : {:.1}%",
        coefficient_of_variation(&series.volume)
    );

    println!("\n   Top 5 highest-volume days:");
    for (date, vol, ret) in stats::top_volume_days(series, 5) {
        println!(
            "     {} : {:>13} shares (daily return {:+.2}%)",
            format_date(date),
            format_volume(vol),
            ret
        );
    }
    println!("\n   -> Volume spikes tend to coincide with large price moves,");
    println!("      earnings releases, and index-wide stress days.");

    println!("\nDAILY RETURNS:\n");
    let returns = stats::return_stats(series);
    print_return_distribution(&returns);
}

fn print_summary(s: &Summary, unit: &str) {
    println!("   Count    : {}", s.count);
    println!("   Mean     : {}{:.2}", unit, s.mean);
    println!("   Median   : {}{:.2}", unit, s.median);
    println!("   Std dev  : {}{:.2}", unit, s.std);
    println!("   Min      : {}{:.2}", unit, s.min);
    println!("   Q1       : {}{:.2}", unit, s.q1);
    println!("   Q3       : {}{:.2}", unit, s.q3);
    println!("   Max      : {}{:.2}", unit, s.max);
}

fn print_summary_volume(s: &Summary) {
    println!("   Count    : {}", s.count);
    println!("   Mean     : {}", format_volume(s.mean));
    println!("   Median   : {}", format_volume(s.median));
    println!("   Std dev  : {}", format_volume(s.std));
    println!("   Min      : {}", format_volume(s.min));
    println!("   Max      : {}", format_volume(s.max));
}

fn print_return_distribution(r: &ReturnStats) {
    println!("   Mean daily return   : {:+.4}%", r.mean);
    println!("   Median daily return : {:+.4}%", r.median);
    println!("   Std dev             : {:.4}%", r.std);
    println!(
        "   Best day            : {} ({:+.2}%)",
        format_date(r.best.0),
        r.best.1
    );
    println!(
        "   Worst day           : {} ({:+.2}%)",
        format_date(r.worst.0),
        r.worst.1
    );
    println!(
        "   Positive days       : {} ({:.1}%)",
        r.positive_days, r.pct_positive
    );
    println!("   Negative days       : {}", r.negative_days);

    println!("\n   Skewness : {:+.3}", r.skewness);
    if r.skewness > 0.1 {
        println!("   -> Right-skewed distribution: extreme gains outnumber extreme losses.");
    } else if r.skewness < -0.1 {
        println!("   -> Left-skewed distribution: extreme losses outnumber extreme gains.");
    } else {
        println!("   -> Broadly symmetric distribution.");
    }

    println!("\n   Excess kurtosis : {:+.3}", r.kurtosis);
    if r.kurtosis > 1.0 {
        println!("   -> Fat tails: extreme moves happen more often than a normal");
        println!("      distribution would suggest.");
    } else {
        println!("   -> Tail behavior close to a normal distribution.");
    }
}

pub fn print_temporal(series: &EnrichedSeries) {
    section("TEMPORAL ANALYSIS");

    println!("\nRETURN BY YEAR:\n");
    let yearly = stats::yearly_returns(series);
    for &(year, ret) in &yearly {
        let marker = if ret >= 0.0 { "[+]" } else { "[-]" };
        println!("   {} {} : {:+8.2}%", marker, year, ret);
    }
    let positive_years = yearly.iter().filter(|(_, r)| *r > 0.0).count();
    println!(
        "\n   {} positive year(s) out of {}.",
        positive_years,
        yearly.len()
    );

    println!("\nRETURN BY MONTH (summed daily returns):\n");
    let monthly = stats::monthly_return_totals(series);
    for (i, &total) in monthly.iter().enumerate() {
        println!("   {:<9} : {:+8.2}%", MONTH_NAMES[i], total);
    }

    println!("\nMEAN RETURN BY WEEKDAY:\n");
    let weekday = stats::weekday_mean_returns(series);
    for (i, &mean) in weekday.iter().enumerate() {
        println!("   {:<9} : {:+.4}%", WEEKDAY_NAMES[i], mean);
    }
}

pub fn print_volatility(series: &EnrichedSeries) {
    section("VOLATILITY ANALYSIS");

    println!("\nHISTORICAL VOLATILITY (30d rolling std of daily returns):\n");
    let vol = Summary::from_values(&series.volatility_30d);
    println!("   Mean    : {:.3}%", vol.mean);
    println!("   Min     : {:.3}%", vol.min);
    println!("   Max     : {:.3}%", vol.max);
    println!("   Current : {:.3}%", series.volatility_30d[series.last()]);

    let range = Summary::from_values(&series.daily_range_pct);
    println!("\n   Mean intraday range (High-Low over Close) : {:.2}%", range.mean);

    println!("\n   HIGH-VOLATILITY PERIODS (30d vol above 1.5x its mean):");
    for (year, days) in stats::high_volatility_days_per_year(series) {
        println!("     {} : {} day(s)", year, days);
    }

    println!("\nEXTREME DAILY RETURNS (beyond +/-5%):\n");
    let (ups, downs) = stats::extreme_days(series, 5);
    println!("   Strongest gains:");
    for (date, ret) in &ups {
        println!("     {} : {:+.2}%", format_date(*date), ret);
    }
    println!("\n   Strongest losses:");
    for (date, ret) in &downs {
        println!("     {} : {:+.2}%", format_date(*date), ret);
    }
}

pub fn print_trend(trend: &TrendKpis) {
    section("TREND ANALYSIS");

    println!("\nCURRENT POSITION VS MOVING AVERAGES:\n");
    println!("   Close   : ${:.2}", trend.last_close);
    println!(
        "   SMA 20  : ${:.2}  (gap {:+.2}%)",
        trend.sma_20, trend.gap_sma_20_pct
    );
    println!(
        "   SMA 50  : ${:.2}  (gap {:+.2}%)",
        trend.sma_50, trend.gap_sma_50_pct
    );
    println!(
        "   SMA 200 : ${:.2}  (gap {:+.2}%)",
        trend.sma_200, trend.gap_sma_200_pct
    );

    let above_all = trend.last_close > trend.sma_20
        && trend.last_close > trend.sma_50
        && trend.last_close > trend.sma_200;
    let below_all = trend.last_close < trend.sma_20
        && trend.last_close < trend.sma_50
        && trend.last_close < trend.sma_200;
    if above_all {
        println!("\n   [OK] UPTREND CONFIRMED: price above all moving averages.");
    } else if below_all {
        println!("\n   [X] DOWNTREND CONFIRMED: price below all moving averages.");
    } else {
        println!("\n   [!] MIXED TREND: price between the moving averages.");
    }

    println!("\nLONG-TERM TREND SIGNAL:\n");
    if trend.golden_cross {
        println!("   [+] GOLDEN CROSS active: SMA 50 > SMA 200, bullish long-term signal.");
    } else {
        println!("   [-] DEATH CROSS active: SMA 50 < SMA 200, bearish long-term signal.");
    }
    if let Some((date, kind)) = trend.last_cross {
        let name = match kind {
            CrossKind::Golden => "golden cross",
            CrossKind::Death => "death cross",
        };
        println!("   Last SMA 50/200 crossover: {} ({})", format_date(date), name);
    }

    println!("\nSUPPORT AND RESISTANCE (trailing year):\n");
    println!(
        "   Support    : ${:.2}  ({:.1}% below current price)",
        trend.support_1y,
        (trend.last_close - trend.support_1y) / trend.last_close * 100.0
    );
    println!(
        "   Resistance : ${:.2}  ({:+.1}% from current price)",
        trend.resistance_1y,
        (trend.resistance_1y - trend.last_close) / trend.last_close * 100.0
    );
    println!(
        "   All-time high: ${:.2}  (distance {:+.2}%)",
        trend.all_time_high, trend.distance_to_ath_pct
    );
}

pub fn print_drawdown(series: &EnrichedSeries, risk: &RiskKpis) {
    section("DRAWDOWN ANALYSIS");

    println!("\nFALL FROM PEAK:\n");
    println!(
        "   Maximum drawdown : {:.2}% on {}",
        risk.max_drawdown_pct,
        format_date(risk.max_drawdown_date)
    );
    println!("   Peak price       : ${:.2}", risk.peak_price);
    println!("   Trough price     : ${:.2}", risk.trough_price);
    match risk.recovery_days {
        Some(days) => println!("   Recovery time    : {} calendar day(s)", days),
        None => println!("   Recovery time    : not yet recovered"),
    }
    println!(
        "   Current drawdown : {:.2}%",
        series.drawdown_pct[series.last()]
    );
}

pub fn print_correlations(series: &EnrichedSeries) {
    section("CORRELATIONS");

    let abs_returns: Vec<f64> = series
        .daily_return_pct
        .iter()
        .map(|r| r.abs())
        .collect();

    let vol_vs_move = correlation(&series.volume, &abs_returns);
    let vol30_vs_move = correlation(&series.volatility_30d, &abs_returns);

    println!("\n   Volume vs |daily return|   : {:+.3}", vol_vs_move);
    println!("   30d vol vs |daily return|  : {:+.3}", vol30_vs_move);

    if vol_vs_move > 0.3 {
        println!("\n   -> Large moves are traded on elevated volume, the usual");
        println!("      signature of information-driven repricing.");
    } else {
        println!("\n   -> Volume and move size are only weakly related here.");
    }
}
