//! Demo seed data
//!
//! The three starter stocks and four starter alerts the demo ships with.

use crate::{AlertStore, QuoteStore};
use tracing::{error, info};
use watch_core::alert::params;
use watch_core::{AlertDefinition, AlertParams, AlertPattern, Quote};

/// Load the starter watchlist into `quotes`.
pub fn seed_quotes(quotes: &QuoteStore) {
    quotes.insert(Quote::new("AAPL", 182.52, 52_234_100));
    quotes.insert(Quote::new("GOOGL", 139.28, 28_456_700));
    quotes.insert(Quote::new("TSLA", 248.75, 168_923_400));
    info!(count = quotes.len(), "seeded demo quotes");
}

/// Load the starter alert definitions into `alerts`.
///
/// Mirrors the demo set: an AAPL price corridor, a TSLA momentum watch, a
/// disabled GOOGL reversal watch, and an AAPL earnings-window alert.
pub fn seed_alerts(alerts: &AlertStore) {
    let defs = [
        AlertDefinition::new(
            "AAPL",
            AlertPattern::PriceTarget,
            AlertParams::new()
                .with_number(params::UPPER_BOUND, 200.0)
                .with_number(params::LOWER_BOUND, 160.0),
        ),
        AlertDefinition::new(
            "TSLA",
            AlertPattern::Momentum,
            AlertParams::new()
                .with_number(params::RSI_THRESHOLD, 70.0)
                .with_flag("macdCrossover", true),
        ),
        AlertDefinition::new(
            "GOOGL",
            AlertPattern::Reversal,
            AlertParams::new()
                .with_flag(params::HAMMER_PATTERN, true)
                .with_flag(params::SUPPORT_RESISTANCE_BREAK, true),
        )
        .map(|a| a.with_enabled(false)),
        AlertDefinition::new(
            "AAPL",
            AlertPattern::Earnings,
            AlertParams::new()
                .with_number(params::DAYS_BEFORE_EARNINGS, 3.0)
                .with_number(params::VOLATILITY_THRESHOLD, 0.05),
        ),
    ];

    for def in defs {
        match def {
            Ok(alert) => alerts.insert(alert),
            Err(e) => error!(error = %e, "skipping invalid seed alert"),
        }
    }
    info!(count = alerts.len(), "seeded demo alerts");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_quotes() {
        let store = QuoteStore::new();
        seed_quotes(&store);
        assert_eq!(store.symbols(), vec!["AAPL", "GOOGL", "TSLA"]);
        assert_eq!(store.get("AAPL").unwrap().price, 182.52);
    }

    #[test]
    fn test_seed_alerts() {
        let store = AlertStore::new();
        seed_alerts(&store);
        assert_eq!(store.len(), 4);
        // The GOOGL reversal watch ships disabled
        assert_eq!(store.list_enabled().len(), 3);
        assert_eq!(store.for_symbol("AAPL").len(), 2);
    }
}
