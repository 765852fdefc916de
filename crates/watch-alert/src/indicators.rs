//! Indicator-provider seam
//!
//! The evaluator consumes derived market signals it does not compute itself.
//! Implementations of [`IndicatorProvider`] bridge to whatever computes them
//! (a TA library, an earnings calendar feed); the two impls here cover "no
//! signals at all" and "fixed signals" for demos and tests.

use std::collections::{HashMap, HashSet};

/// Supplier of derived per-symbol signals
pub trait IndicatorProvider: Send + Sync {
    /// Latest RSI reading for `symbol`, 0..=100
    fn rsi(&self, symbol: &str) -> Option<f64>;

    /// Rolling average session volume for `symbol`
    fn average_volume(&self, symbol: &str) -> Option<f64>;

    /// Days until the next earnings date for `symbol`
    fn earnings_in_days(&self, symbol: &str) -> Option<u32>;

    /// Whether a reversal pattern is currently flagged for `symbol`
    fn reversal_signal(&self, symbol: &str) -> bool;
}

/// Provider with no signals; indicator-driven alerts never fire
#[derive(Debug, Clone, Copy, Default)]
pub struct NullIndicators;

impl IndicatorProvider for NullIndicators {
    fn rsi(&self, _symbol: &str) -> Option<f64> {
        None
    }

    fn average_volume(&self, _symbol: &str) -> Option<f64> {
        None
    }

    fn earnings_in_days(&self, _symbol: &str) -> Option<u32> {
        None
    }

    fn reversal_signal(&self, _symbol: &str) -> bool {
        false
    }
}

/// Fixed per-symbol signal values
#[derive(Debug, Clone, Default)]
pub struct StaticIndicators {
    rsi: HashMap<String, f64>,
    average_volume: HashMap<String, f64>,
    earnings_in_days: HashMap<String, u32>,
    reversals: HashSet<String>,
}

impl StaticIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rsi(mut self, symbol: impl Into<String>, value: f64) -> Self {
        self.rsi.insert(symbol.into(), value);
        self
    }

    pub fn with_average_volume(mut self, symbol: impl Into<String>, value: f64) -> Self {
        self.average_volume.insert(symbol.into(), value);
        self
    }

    pub fn with_earnings_in_days(mut self, symbol: impl Into<String>, days: u32) -> Self {
        self.earnings_in_days.insert(symbol.into(), days);
        self
    }

    pub fn with_reversal(mut self, symbol: impl Into<String>) -> Self {
        self.reversals.insert(symbol.into());
        self
    }
}

impl IndicatorProvider for StaticIndicators {
    fn rsi(&self, symbol: &str) -> Option<f64> {
        self.rsi.get(symbol).copied()
    }

    fn average_volume(&self, symbol: &str) -> Option<f64> {
        self.average_volume.get(symbol).copied()
    }

    fn earnings_in_days(&self, symbol: &str) -> Option<u32> {
        self.earnings_in_days.get(symbol).copied()
    }

    fn reversal_signal(&self, symbol: &str) -> bool {
        self.reversals.contains(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_provider_has_no_signals() {
        let provider = NullIndicators;
        assert!(provider.rsi("AAPL").is_none());
        assert!(provider.average_volume("AAPL").is_none());
        assert!(provider.earnings_in_days("AAPL").is_none());
        assert!(!provider.reversal_signal("AAPL"));
    }

    #[test]
    fn test_static_provider_round_trip() {
        let provider = StaticIndicators::new()
            .with_rsi("TSLA", 72.5)
            .with_average_volume("TSLA", 90_000_000.0)
            .with_earnings_in_days("AAPL", 2)
            .with_reversal("GOOGL");

        assert_eq!(provider.rsi("TSLA"), Some(72.5));
        assert_eq!(provider.rsi("AAPL"), None);
        assert_eq!(provider.earnings_in_days("AAPL"), Some(2));
        assert!(provider.reversal_signal("GOOGL"));
        assert!(!provider.reversal_signal("TSLA"));
    }
}
