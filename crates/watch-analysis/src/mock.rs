//! Canned demo generator

use crate::error::Result;
use crate::generator::AnalysisGenerator;
use async_trait::async_trait;
use tracing::debug;
use watch_core::{AnalysisResult, AnalysisType, Confidence};

/// Section titles kept for a technical-only report
const TECHNICAL_SECTIONS: &[&str] = &["Technical Analysis", "Risk Factors"];
/// Section titles kept for a fundamental-only report
const FUNDAMENTAL_SECTIONS: &[&str] = &["Fundamental", "Operational", "AI Opportunity"];

/// Serves pre-written analyses for the demo watchlist
///
/// Symbols without a canned write-up get a generic placeholder report at low
/// confidence. Earnings and full requests keep every section; technical and
/// fundamental requests are cut down to their slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAnalysisGenerator;

impl MockAnalysisGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalysisGenerator for MockAnalysisGenerator {
    async fn generate(&self, symbol: &str, analysis_type: AnalysisType) -> Result<AnalysisResult> {
        let full = match symbol {
            "AAPL" => aapl(analysis_type),
            "MSFT" => msft(analysis_type),
            "TSLA" => tsla(analysis_type),
            other => {
                debug!(symbol = %other, "no canned analysis, serving generic report");
                generic(other, analysis_type)
            }
        };

        let result = match analysis_type {
            AnalysisType::Technical => full.retain_sections(TECHNICAL_SECTIONS),
            AnalysisType::Fundamental => full.retain_sections(FUNDAMENTAL_SECTIONS),
            AnalysisType::Earnings | AnalysisType::Full => full,
        };
        Ok(result)
    }
}

fn aapl(analysis_type: AnalysisType) -> AnalysisResult {
    AnalysisResult::new(
        "AAPL",
        analysis_type,
        "Apple Inc. - Technical & Fundamental Analysis",
        "AAPL shows strong uptrend with support at $185. Recent earnings beat expectations \
         with 12% YoY revenue growth. AI integration announcements driving sentiment. Watch \
         for potential consolidation before next breakout.",
    )
    .with_section(
        "Technical Analysis",
        [
            "Price above 20-day & 50-day moving averages (bullish)",
            "5-day RSI at 62 - not overbought, room to run",
            "Support at $185, resistance at $195",
            "Volume above average on up days",
        ],
    )
    .with_section(
        "Fundamental",
        [
            "P/E ratio 28.5 - in line with tech average",
            "Services revenue growing 15% YoY",
            "Strong cash flow generation",
        ],
    )
    .with_section(
        "Catalysts",
        [
            "Earnings beat expected next quarter",
            "AI features rollout through spring",
            "New flagship hardware cycle",
        ],
    )
    .with_section(
        "Risk Factors",
        [
            "Macro headwinds (interest rates)",
            "China market exposure",
            "iPhone dependency",
        ],
    )
    .with_confidence(Confidence::High)
    .with_recommendation("HOLD - Strong fundamentals, good entry points on dips below $185")
}

fn msft(analysis_type: AnalysisType) -> AnalysisResult {
    AnalysisResult::new(
        "MSFT",
        analysis_type,
        "Microsoft Corporation - Cloud & AI Growth Story",
        "MSFT is well-positioned for the AI boom with Azure expansion and its OpenAI \
         partnership. Enterprise cloud demand remains strong. Stock consolidating near \
         resistance, waiting for an earnings catalyst.",
    )
    .with_section(
        "Technical Analysis",
        [
            "Consolidation pattern forming between $360-$385",
            "RSI near midpoint (50), no extreme conditions",
            "Volume declining on moves (waiting for breakout)",
            "Support at 50-day MA (~$370)",
        ],
    )
    .with_section(
        "Fundamental",
        [
            "Azure growth accelerating (30%+ YoY)",
            "AI monetization beginning with Copilot",
            "Enterprise software division stable",
        ],
    )
    .with_section(
        "AI Opportunity",
        [
            "OpenAI partnership deepening",
            "Copilot integration across products",
            "Enterprise AI assistant licensing",
        ],
    )
    .with_confidence(Confidence::High)
    .with_recommendation("BUY - Dips below $370 are attractive. AI thesis intact.")
}

fn tsla(analysis_type: AnalysisType) -> AnalysisResult {
    AnalysisResult::new(
        "TSLA",
        analysis_type,
        "Tesla Inc. - Recovery in Progress",
        "TSLA volatile but showing recovery signs. Margin pressure easing as price cuts \
         boost volumes. Factory expansion and a next-gen platform in the pipeline. \
         Sentiment shifting positive.",
    )
    .with_section(
        "Technical Analysis",
        [
            "Recovering from lows, above critical $200 support",
            "RSI still below 50 (room for bounce)",
            "Need to hold above $230 for continuation",
            "High volatility - typical for TSLA",
        ],
    )
    .with_section(
        "Operational",
        [
            "European factory ramping production",
            "Next-gen platform architecture finalized",
            "Energy business accelerating",
        ],
    )
    .with_section(
        "Catalysts",
        [
            "Quarterly delivery numbers (usually beats)",
            "New factory location announcement",
            "Energy division milestones",
        ],
    )
    .with_section(
        "Risk Factors",
        ["Execution risk on ramps", "Demand sensitivity to pricing"],
    )
    .with_confidence(Confidence::Medium)
    .with_recommendation("HOLD / ACCUMULATE ON DIPS - Turnaround story, volatile execution risk")
}

fn generic(symbol: &str, analysis_type: AnalysisType) -> AnalysisResult {
    AnalysisResult::new(
        symbol,
        analysis_type,
        format!("{symbol} - Market Analysis Report"),
        format!(
            "Analysis of {symbol} indicating current market conditions and price action. \
             Further detailed analysis requires extended historical data and real-time \
             market feeds."
        ),
    )
    .with_section(
        "Technical Analysis",
        [
            "Price action shows consolidation patterns",
            "Volume trends need monitoring",
            "Need longer timeframe data for trend confirmation",
        ],
    )
    .with_confidence(Confidence::Low)
    .with_recommendation("HOLD - Require more detailed market data")
}
