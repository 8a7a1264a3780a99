// src/main.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use stock_analyzer::analysis::{kpi, scoring, stats};
use stock_analyzer::charts;
use stock_analyzer::fetch::HistoryClient;
use stock_analyzer::indicators::enrich;
use stock_analyzer::quality::{audit, remediate};
use stock_analyzer::report::{executive, exploration};

const SYMBOL: &str = "MSFT";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let start = NaiveDate::from_ymd_opt(2010, 1, 1).context("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2025, 1, 1).context("invalid end date")?;

    // Fetch history
    let client = HistoryClient::new().context("failed to build HTTP client")?;
    let bars = match client.fetch_daily(SYMBOL, start, end).await {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("Could not download {} history: {}", SYMBOL, e);
            std::process::exit(1);
        }
    };
    info!("fetched {} daily bars for {}", bars.len(), SYMBOL);

    // Audit and repair data quality
    let quality = audit(&bars);
    let bars = remediate(bars);

    // Derive every analysis column once
    let series = enrich(&bars)?;

    // Compute KPIs and the score card
    let perf = kpi::performance(&series);
    let risk = kpi::risk(&series, &perf);
    let trend = kpi::trend(&series);
    let card = scoring::score(&perf, &risk, &trend);

    // Narrative sections
    exploration::print_exploration(SYMBOL, &quality, &series, &risk, &trend);

    // Charts
    let yearly = stats::yearly_returns(&series);
    charts::print_chart_sequence(SYMBOL, &series, &yearly);

    // KPI dashboard, printed and saved
    let panel = charts::render_dashboard(SYMBOL, &perf, &risk, &trend, &card);
    println!("\n{}", panel);
    charts::save_dashboard(&panel)?;

    // Executive report
    executive::print_executive(SYMBOL, &series, &perf, &risk, &trend, &card);

    Ok(())
}
