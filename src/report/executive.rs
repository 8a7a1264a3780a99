//! Executive summary: decision, justification, per-profile guidance, risks.

use crate::analysis::kpi::{PerformanceKpis, RiskKpis, TrendKpis};
use crate::analysis::scoring::{Recommendation, ScoreCard};
use crate::indicators::EnrichedSeries;
use crate::report::{banner, section};
use crate::utils::{format_date, format_money};

/// Print the executive report in its fixed order.
pub fn print_executive(
    symbol: &str,
    series: &EnrichedSeries,
    perf: &PerformanceKpis,
    risk: &RiskKpis,
    trend: &TrendKpis,
    card: &ScoreCard,
) {
    banner(&format!("EXECUTIVE REPORT - {}", symbol));

    print_context(symbol, series, perf);
    print_key_results(perf, risk, trend, card);
    print_recommendation(perf, card);
    print_score_breakdown(card);
    print_investor_profiles(perf, risk, trend, card);
    print_action_plan(trend);
    print_risks_and_limits(risk, card);
}

fn print_context(symbol: &str, series: &EnrichedSeries, perf: &PerformanceKpis) {
    section("[1] CONTEXT AND OBJECTIVE");

    println!(
        "\n   Mission   : analyze {} over {:.1} years of history",
        symbol, perf.years
    );
    println!("   Objective : decide whether the stock is worth buying today");
    println!(
        "   Period    : {} to {}",
        format_date(perf.first_date),
        format_date(perf.last_date)
    );
    println!("   Rows      : {} trading days", series.len());
}

fn print_key_results(
    perf: &PerformanceKpis,
    risk: &RiskKpis,
    trend: &TrendKpis,
    card: &ScoreCard,
) {
    section("[2] KEY RESULTS");

    println!("\n   [PERFORMANCE]");
    println!("   - Total return        : {:+.2}%", perf.total_return_pct);
    println!("   - CAGR                : {:+.2}% per year", perf.cagr_pct);
    println!("   - Capital multiple    : x{:.2}", perf.capital_multiple);
    let gain_sign = if perf.portfolio_gain >= 0.0 { "+" } else { "" };
    println!(
        "   - ${} invested at the start is worth ${} today ({}{})",
        format_money(perf.portfolio_final - perf.portfolio_gain),
        format_money(perf.portfolio_final),
        gain_sign,
        format_money(perf.portfolio_gain)
    );
    if let Some((ret, _)) = perf.trailing_1y {
        println!("   - Trailing 1y         : {:+.2}%", ret);
    }
    if let Some((ret, cagr)) = perf.trailing_5y {
        println!("   - Trailing 5y         : {:+.2}% ({:+.2}% annualized)", ret, cagr);
    }
    if let Some((ret, cagr)) = perf.trailing_10y {
        println!("   - Trailing 10y        : {:+.2}% ({:+.2}% annualized)", ret, cagr);
    }

    println!("\n   [RISK]");
    println!(
        "   - Annualized volatility : {:.2}% ({} risk)",
        risk.annualized_volatility_pct, card.risk_level
    );
    println!(
        "   - Max drawdown          : {:.2}% (trough on {})",
        risk.max_drawdown_pct,
        format_date(risk.max_drawdown_date)
    );
    let sharpe_label = if risk.sharpe_ratio < 1.0 {
        "acceptable"
    } else if risk.sharpe_ratio < 2.0 {
        "good"
    } else {
        "excellent"
    };
    println!(
        "   - Sharpe ratio          : {:.3} ({} risk-adjusted return)",
        risk.sharpe_ratio, sharpe_label
    );
    println!(
        "   - Return/risk ratio     : {:.3} ({})",
        risk.return_risk_ratio,
        if risk.return_risk_ratio > 1.0 {
            "favorable"
        } else {
            "unfavorable"
        }
    );
    println!(
        "   - VaR 95%               : {:.2}% daily, {:.2}% monthly",
        risk.var_95_daily_pct, risk.var_95_monthly_pct
    );

    println!("\n   [TECHNICAL]");
    println!(
        "   - Price {} the SMA 200 ({:+.2}%)",
        if trend.gap_sma_200_pct > 0.0 { "above" } else { "below" },
        trend.gap_sma_200_pct
    );
    println!(
        "   - Long-term signal      : {}",
        if trend.golden_cross {
            "GOLDEN CROSS, bullish configuration"
        } else {
            "DEATH CROSS, bearish configuration"
        }
    );
    println!(
        "   - SMA 50 {} SMA 200",
        if trend.sma_50 > trend.sma_200 { ">" } else { "<" }
    );
    println!("   - Distance to ATH       : {:+.2}%", trend.distance_to_ath_pct);
}

fn print_recommendation(perf: &PerformanceKpis, card: &ScoreCard) {
    section("[3] FINAL RECOMMENDATION");

    let tag = match card.recommendation {
        Recommendation::Buy => "[+++]",
        Recommendation::GradualBuy => "[++]",
        Recommendation::Hold => "[=]",
        Recommendation::Wait => "[-]",
    };
    println!("\n   DECISION         : {} {}", tag, card.recommendation);
    println!("   Confidence level : {}", card.confidence);
    println!("   Composite score  : {:.1}/10", card.composite);

    println!("\n   JUSTIFICATION:");
    match card.recommendation {
        Recommendation::Buy => {
            println!(
                "   - Outstanding historical performance (CAGR {:.2}% vs a broad market near 10%)",
                perf.cagr_pct
            );
            println!("   - Uptrend confirmed by the technical indicators");
            println!(
                "   - {} volatility is acceptable for the return obtained",
                card.risk_level
            );
            println!("   - Suited to investors with a horizon above 5 years");
        }
        Recommendation::GradualBuy => {
            println!("   - Solid performance but mixed technical signals");
            println!("   - Prefer a dollar-cost-averaging strategy");
            println!("   - Gradual entry over 3-6 months recommended");
        }
        Recommendation::Hold => {
            println!("   - Current situation is uncertain, wait for trend confirmation");
            println!("   - Holders: keep the position");
            println!("   - New investors: wait for a better entry point");
        }
        Recommendation::Wait => {
            println!("   - Unfavorable technical signals");
            println!("   - Wait for the indicators to improve before investing");
        }
    }
}

fn print_score_breakdown(card: &ScoreCard) {
    section("[4] SCORE BREAKDOWN");

    println!("\n   Performance (weight 0.4) : {:>4.1}/10  ({})", card.performance_score, card.performance_grade);
    println!("   Risk        (weight 0.3) : {:>4.1}/10  ({} risk)", card.risk_score, card.risk_level);
    println!("   Technical   (weight 0.3) : {:>4.1}/10", card.technical_score);
    println!("   Composite                : {:>4.2}/10", card.composite);
    println!("   Verdict                  : {}", card.verdict);
}

fn print_investor_profiles(
    perf: &PerformanceKpis,
    risk: &RiskKpis,
    trend: &TrendKpis,
    card: &ScoreCard,
) {
    section("[5] GUIDANCE BY INVESTOR PROFILE");

    println!("\n[PROFILE 1] CONSERVATIVE INVESTOR");
    println!("\n   CHARACTERISTICS:");
    println!("   - High risk aversion, capital preservation first");
    println!("   - Loss tolerance below 10%");
    println!("   - Horizon: short/medium term (1-3 years)");
    if risk.annualized_volatility_pct > 20.0 || risk.max_drawdown_pct.abs() > 25.0 {
        println!("\n   RECOMMENDATION: WAIT, or a very limited position (5-10% of the portfolio)");
        println!("   JUSTIFICATION:");
        println!(
            "   - Volatility of {:.1}% is too high for this profile",
            risk.annualized_volatility_pct
        );
        println!(
            "   - A historical drawdown of {:.1}% exceeds the acceptable tolerance",
            risk.max_drawdown_pct.abs()
        );
        println!("\n   ALTERNATIVE:");
        println!("   - Prefer bonds or diversified, less volatile funds");
        println!("   - For tech exposure, a diversified technology ETF");
    } else {
        println!("\n   RECOMMENDATION: LIMITED BUY (10-15% of the portfolio)");
        println!("   JUSTIFICATION:");
        println!("   - Volatility acceptable for a limited exposure");
        println!("   - Solid historical performance justifies a minimal allocation");
        println!("\n   STRATEGY:");
        println!("   - Gradual entry (DCA over 12 months)");
        println!("   - Strict stop-loss at -10%");
    }

    println!("\n[PROFILE 2] BALANCED INVESTOR");
    println!("\n   CHARACTERISTICS:");
    println!("   - Balance between return and risk, moderate growth objective");
    println!("   - Loss tolerance 10-20%");
    println!("   - Horizon: medium/long term (3-7 years)");
    if card.composite >= 6.0 {
        println!("\n   RECOMMENDATION: MODERATE BUY (20-25% of the portfolio)");
        println!("   JUSTIFICATION:");
        println!(
            "   - Good return/risk balance (CAGR {:.2}% vs volatility {:.1}%)",
            perf.cagr_pct, risk.annualized_volatility_pct
        );
        println!(
            "   - Composite score of {:.1}/10 indicates an attractive opportunity",
            card.composite
        );
        println!("\n   ENTRY STRATEGY:");
        println!("   - Gradual entry (DCA over 6 months)");
        println!("   - 50% now, 25% at 3 months, 25% at 6 months");
        println!("   - Quarterly review of the position");
    } else if card.composite >= 4.0 {
        println!("\n   RECOMMENDATION: HOLD or CAUTIOUS BUY (15-20%)");
        println!("   JUSTIFICATION:");
        println!("   - Mixed signals call for caution");
        println!("\n   STRATEGY:");
        println!("   - DCA over 12 months to reduce entry risk");
        println!("   - Stop-loss at -15%");
    } else {
        println!("\n   RECOMMENDATION: WAIT");
        println!("   - Wait for the technical indicators to improve");
    }

    println!("\n[PROFILE 3] AGGRESSIVE INVESTOR");
    println!("\n   CHARACTERISTICS:");
    println!("   - Seeks high returns and strong capital growth");
    println!("   - Loss tolerance above 25%");
    println!("   - Horizon: long term (over 7 years)");
    if card.composite >= 6.0 {
        println!("\n   RECOMMENDATION: SIGNIFICANT BUY (30-40% of the portfolio)");
        println!("   JUSTIFICATION:");
        println!(
            "   - Outstanding historical performance (CAGR {:.2}%)",
            perf.cagr_pct
        );
        println!("   - Volatility is acceptable for an aggressive profile");
        println!("\n   ENTRY STRATEGY:");
        if trend.golden_cross && trend.last_close > trend.sma_50 {
            println!("   - Immediate entry possible (50-70% of the allocation)");
            println!("   - Complete the position on corrections (30-50%)");
        } else {
            println!("   - Fast DCA over 3 months");
            println!("   - Use corrections to add to the position");
        }
        println!("\n   MANAGEMENT:");
        println!("   - Wide stop-loss at -25% to -30%");
        println!("   - Price target on a 3-5 year horizon, annual review");
    } else {
        println!("\n   RECOMMENDATION: MODERATE BUY (20-25%)");
        println!("   - Reduced allocation while waiting for trend confirmation");
    }
}

fn print_action_plan(trend: &TrendKpis) {
    section("[6] ACTION PLAN");

    println!("\n   BEFORE INVESTING:");
    println!("   1. Define your investor profile (conservative/balanced/aggressive)");
    println!("   2. Size the position: never invest more than you can afford to lose");
    println!("   3. Define your investment horizon");
    println!("   4. Check the diversification of your overall portfolio");

    println!("\n   ENTRY STRATEGY:");
    if trend.golden_cross && trend.last_close > trend.sma_200 {
        println!("   Current situation: confirmed uptrend.");
        println!(
            "   - Option A, immediate entry: buy 50-70% of the allocation near ${:.2},",
            trend.last_close
        );
        println!("     staggered orders at -5%, -10%, -15% to complete");
        println!("   - Option B, fast DCA: one third now, one third in 1 month, one third in 2");
        println!("   - Option C, slow DCA: fixed monthly amount over 6-12 months");
    } else {
        println!("   Current situation: uncertain or bearish trend.");
        println!("   - DCA over 6-12 months");
        println!("   - Wait for bullish confirmation before accelerating");
        println!("   - Prefer buying corrections deeper than 5%");
    }

    println!("\n   KEY LEVELS:");
    println!("   Current price : ${:.2}", trend.last_close);
    println!(
        "   Support (1y floor)     : ${:.2} ({:.1}% below)",
        trend.support_1y,
        (trend.last_close - trend.support_1y) / trend.last_close * 100.0
    );
    println!("   - A break below it opens room for a further correction");
    println!(
        "   Resistance (1y ceiling): ${:.2} ({:+.1}% away)",
        trend.resistance_1y,
        (trend.resistance_1y - trend.last_close) / trend.last_close * 100.0
    );
}

fn print_risks_and_limits(risk: &RiskKpis, card: &ScoreCard) {
    section("[7] RISKS AND LIMITS");

    println!("\n   IDENTIFIED RISKS:");
    println!(
        "   - {} volatility: corrections of 20-30% are possible",
        card.risk_level
    );
    println!("   - Single-stock exposure, no diversification");
    println!(
        "   - Historical drawdown: a loss of {:.2}% has already happened",
        risk.max_drawdown_pct.abs()
    );
    println!("   - Sensitivity to economic and technology cycles");

    println!("\n   LIMITS OF THIS ANALYSIS:");
    println!("   - Based on historical data only; past performance does not");
    println!("     guarantee future results");
    println!("   - Macro factors not modeled (inflation, interest rates)");
    println!("   - No fundamental analysis (earnings, financial ratios)");
    println!("   - Geopolitical events not taken into account");
}
