//! Threshold-based scoring of the KPIs and the final recommendation.

use std::fmt;

use tracing::info;

use crate::analysis::kpi::{PerformanceKpis, RiskKpis, TrendKpis};

/// Qualitative risk bucket derived from annualized volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Qualitative growth bucket derived from CAGR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceGrade {
    Excellent,
    VeryGood,
    Good,
    Moderate,
}

impl fmt::Display for PerformanceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceGrade::Excellent => write!(f, "Excellent"),
            PerformanceGrade::VeryGood => write!(f, "Very good"),
            PerformanceGrade::Good => write!(f, "Good"),
            PerformanceGrade::Moderate => write!(f, "Moderate"),
        }
    }
}

/// Overall attractiveness bucket from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    VeryAttractive,
    Attractive,
    Neutral,
    Unattractive,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::VeryAttractive => write!(f, "Very attractive"),
            Verdict::Attractive => write!(f, "Attractive"),
            Verdict::Neutral => write!(f, "Neutral"),
            Verdict::Unattractive => write!(f, "Unattractive"),
        }
    }
}

/// How strongly the composite backs the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Moderate,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Moderate => write!(f, "Moderate"),
            Confidence::Low => write!(f, "Low"),
        }
    }
}

/// Action suggested by the composite score and trend configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Buy,
    GradualBuy,
    Hold,
    Wait,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "BUY"),
            Recommendation::GradualBuy => write!(f, "GRADUAL BUY"),
            Recommendation::Hold => write!(f, "HOLD"),
            Recommendation::Wait => write!(f, "WAIT"),
        }
    }
}

/// The three sub-scores, their weighted composite, and the verdicts.
#[derive(Debug, Clone)]
pub struct ScoreCard {
    pub performance_score: f64,
    pub risk_score: f64,
    pub technical_score: f64,
    pub composite: f64,
    pub risk_level: RiskLevel,
    pub performance_grade: PerformanceGrade,
    pub verdict: Verdict,
    pub recommendation: Recommendation,
    pub confidence: Confidence,
}

/// Performance sub-score from CAGR, on a 0-10 scale.
pub fn performance_score(cagr_pct: f64) -> f64 {
    if cagr_pct > 15.0 {
        10.0
    } else if cagr_pct > 12.0 {
        8.0
    } else if cagr_pct > 10.0 {
        7.0
    } else if cagr_pct > 7.0 {
        5.0
    } else {
        3.0
    }
}

/// Risk sub-score from annualized volatility, with a drawdown penalty,
/// clamped to [0, 10].
pub fn risk_score(annualized_vol_pct: f64, max_drawdown_pct: f64) -> f64 {
    let base: f64 = if annualized_vol_pct < 15.0 {
        10.0
    } else if annualized_vol_pct < 20.0 {
        8.0
    } else if annualized_vol_pct < 25.0 {
        6.0
    } else if annualized_vol_pct < 30.0 {
        4.0
    } else {
        2.0
    };

    let dd = max_drawdown_pct.abs();
    let penalty = if dd < 20.0 {
        0.0
    } else if dd < 30.0 {
        -1.0
    } else {
        -2.0
    };

    (base + penalty).clamp(0.0, 10.0)
}

/// Technical sub-score from the moving-average posture, max 10.
pub fn technical_score(trend: &TrendKpis) -> f64 {
    let mut score = 0.0;
    if trend.last_close > trend.sma_200 {
        score += 3.0;
    }
    if trend.last_close > trend.sma_50 {
        score += 3.0;
    }
    if trend.golden_cross {
        score += 3.0;
    }
    if trend.distance_to_ath_pct > -10.0 {
        score += 1.0;
    }
    score
}

pub fn risk_level(annualized_vol_pct: f64) -> RiskLevel {
    if annualized_vol_pct < 15.0 {
        RiskLevel::Low
    } else if annualized_vol_pct < 25.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

pub fn performance_grade(cagr_pct: f64) -> PerformanceGrade {
    if cagr_pct > 15.0 {
        PerformanceGrade::Excellent
    } else if cagr_pct > 10.0 {
        PerformanceGrade::VeryGood
    } else if cagr_pct > 7.0 {
        PerformanceGrade::Good
    } else {
        PerformanceGrade::Moderate
    }
}

fn verdict(composite: f64) -> Verdict {
    if composite >= 8.0 {
        Verdict::VeryAttractive
    } else if composite >= 6.0 {
        Verdict::Attractive
    } else if composite >= 4.0 {
        Verdict::Neutral
    } else {
        Verdict::Unattractive
    }
}

fn recommendation(composite: f64, uptrend: bool, cagr_pct: f64) -> (Recommendation, Confidence) {
    if composite >= 7.0 && uptrend && cagr_pct > 10.0 {
        (Recommendation::Buy, Confidence::High)
    } else if composite >= 5.0 && uptrend {
        (Recommendation::GradualBuy, Confidence::Moderate)
    } else if composite >= 4.0 {
        (Recommendation::Hold, Confidence::Moderate)
    } else {
        (Recommendation::Wait, Confidence::Low)
    }
}

/// Fold the three KPI groups into the weighted composite and its verdicts.
pub fn score(perf: &PerformanceKpis, risk: &RiskKpis, trend: &TrendKpis) -> ScoreCard {
    let performance_score = performance_score(perf.cagr_pct);
    let risk_score = risk_score(risk.annualized_volatility_pct, risk.max_drawdown_pct);
    let technical_score = technical_score(trend);
    let composite = performance_score * 0.4 + risk_score * 0.3 + technical_score * 0.3;

    let uptrend = trend.golden_cross;
    let (recommendation, confidence) = recommendation(composite, uptrend, perf.cagr_pct);

    info!(
        composite,
        %recommendation,
        "score card assembled"
    );

    ScoreCard {
        performance_score,
        risk_score,
        technical_score,
        composite,
        risk_level: risk_level(risk.annualized_volatility_pct),
        performance_grade: performance_grade(perf.cagr_pct),
        verdict: verdict(composite),
        recommendation,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_score_bands() {
        assert_eq!(performance_score(16.0), 10.0);
        assert_eq!(performance_score(15.0), 8.0); // boundary is exclusive
        assert_eq!(performance_score(12.5), 8.0);
        assert_eq!(performance_score(11.0), 7.0);
        assert_eq!(performance_score(8.0), 5.0);
        assert_eq!(performance_score(7.0), 3.0);
        assert_eq!(performance_score(-4.0), 3.0);
    }

    #[test]
    fn test_risk_score_bands_and_penalty() {
        assert_eq!(risk_score(10.0, -10.0), 10.0);
        assert_eq!(risk_score(15.0, -10.0), 8.0); // boundary lands in the next band
        assert_eq!(risk_score(22.0, -10.0), 6.0);
        assert_eq!(risk_score(27.0, -25.0), 3.0); // 4 - 1
        assert_eq!(risk_score(40.0, -50.0), 0.0); // 2 - 2
        assert_eq!(risk_score(12.0, -35.0), 8.0); // 10 - 2
    }

    #[test]
    fn test_risk_score_clamped() {
        // Penalty can never push the score below zero.
        assert!(risk_score(50.0, -80.0) >= 0.0);
    }

    #[test]
    fn test_technical_score_components() {
        let trend = TrendKpis {
            last_close: 110.0,
            sma_20: 105.0,
            sma_50: 100.0,
            sma_200: 95.0,
            gap_sma_20_pct: 4.76,
            gap_sma_50_pct: 10.0,
            gap_sma_200_pct: 15.8,
            golden_cross: true,
            last_cross: None,
            all_time_high: 112.0,
            distance_to_ath_pct: -1.79,
            support_1y: 90.0,
            resistance_1y: 112.0,
        };
        assert_eq!(technical_score(&trend), 10.0);

        let bearish = TrendKpis {
            last_close: 80.0,
            sma_50: 100.0,
            sma_200: 95.0,
            golden_cross: false,
            distance_to_ath_pct: -28.6,
            ..trend
        };
        assert_eq!(technical_score(&bearish), 0.0);
    }

    #[test]
    fn test_recommendation_tiers() {
        assert_eq!(
            recommendation(7.5, true, 12.0),
            (Recommendation::Buy, Confidence::High)
        );
        // High score without the uptrend never yields a buy.
        assert_eq!(
            recommendation(7.5, false, 12.0),
            (Recommendation::Hold, Confidence::Moderate)
        );
        assert_eq!(
            recommendation(5.5, true, 8.0),
            (Recommendation::GradualBuy, Confidence::Moderate)
        );
        assert_eq!(
            recommendation(4.2, false, 8.0),
            (Recommendation::Hold, Confidence::Moderate)
        );
        assert_eq!(
            recommendation(3.0, true, 2.0),
            (Recommendation::Wait, Confidence::Low)
        );
    }

    #[test]
    fn test_verdict_bands() {
        assert_eq!(verdict(8.0), Verdict::VeryAttractive);
        assert_eq!(verdict(6.0), Verdict::Attractive);
        assert_eq!(verdict(4.0), Verdict::Neutral);
        assert_eq!(verdict(3.9), Verdict::Unattractive);
    }

    #[test]
    fn test_qualitative_labels() {
        assert_eq!(risk_level(10.0), RiskLevel::Low);
        assert_eq!(risk_level(20.0), RiskLevel::Moderate);
        assert_eq!(risk_level(30.0), RiskLevel::High);

        assert_eq!(performance_grade(16.0), PerformanceGrade::Excellent);
        assert_eq!(performance_grade(12.0), PerformanceGrade::VeryGood);
        assert_eq!(performance_grade(8.0), PerformanceGrade::Good);
        assert_eq!(performance_grade(5.0), PerformanceGrade::Moderate);
    }
}
