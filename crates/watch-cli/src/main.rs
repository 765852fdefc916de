//! Command-line demo for the watchlist background core
//!
//! Seeds the demo data, starts the background jobs, and optionally follows
//! one analysis report to completion. The demo indicator values make the
//! seeded TSLA momentum and AAPL earnings alerts observable without a real
//! indicator feed.

use anyhow::bail;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use watch_alert::StaticIndicators;
use watch_app::AppContext;
use watch_core::{AnalysisType, ReportStatus};

#[derive(Parser, Debug)]
#[command(name = "watch-cli")]
#[command(about = "Demo driver for the stock-watchlist background core", long_about = None)]
struct Args {
    /// Symbol to request a demo analysis report for
    #[arg(short, long)]
    symbol: Option<String>,

    /// Analysis type: technical, fundamental, earnings, or full
    #[arg(short = 't', long, default_value = "full")]
    analysis_type: String,

    /// Exit after this many seconds instead of waiting for ctrl-c
    #[arg(long)]
    run_for: Option<u64>,
}

fn parse_analysis_type(value: &str) -> anyhow::Result<AnalysisType> {
    Ok(match value {
        "technical" => AnalysisType::Technical,
        "fundamental" => AnalysisType::Fundamental,
        "earnings" => AnalysisType::Earnings,
        "full" => AnalysisType::Full,
        other => bail!("unknown analysis type `{other}` (expected technical, fundamental, earnings, or full)"),
    })
}

/// Poll a report's progress until it reaches a terminal state.
async fn follow_report(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    loop {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let status = ctx.pipeline().status(id)?;
        info!(report_id = %id, status = ?status.status, progress = status.progress, "report progress");

        if !status.status.is_terminal() {
            continue;
        }

        let report = ctx.pipeline().report(id)?;
        if report.status == ReportStatus::Failed {
            let error = report.error.unwrap_or_else(|| "unknown error".to_string());
            println!("report failed: {error}");
        } else if let Some(result) = report.result {
            println!("\n{}\n", result.title);
            println!("{}\n", result.summary);
            for section in &result.sections {
                println!("## {}", section.title);
                for point in &section.points {
                    println!("  - {point}");
                }
            }
            println!("\nRecommendation: {}", result.recommendation);
        }
        return Ok(());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    watch_app::init_tracing();
    let args = Args::parse();

    // Fixed demo signals so the seeded momentum/earnings alerts can fire
    let indicators = StaticIndicators::new()
        .with_rsi("TSLA", 72.0)
        .with_average_volume("TSLA", 90_000_000.0)
        .with_earnings_in_days("AAPL", 2);

    let ctx = AppContext::builder()
        .indicators(Arc::new(indicators))
        .build()?;
    ctx.seed_demo_data();
    ctx.start()?;
    info!("watchlist core running; ctrl-c to stop");

    if let Some(symbol) = args.symbol {
        let analysis_type = parse_analysis_type(&args.analysis_type)?;
        let report = ctx.request_report(&symbol, analysis_type)?;
        info!(report_id = %report.id, symbol = %report.symbol, "report requested");
        follow_report(&ctx, &report.id).await?;
    }

    match args.run_for {
        Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
        None => tokio::signal::ctrl_c().await?,
    }

    ctx.shutdown();
    Ok(())
}
