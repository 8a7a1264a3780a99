pub mod kpi;
pub mod scoring;
pub mod stats;

pub use self::kpi::{CrossKind, PerformanceKpis, RiskKpis, TrendKpis};
pub use self::scoring::{Recommendation, ScoreCard};
