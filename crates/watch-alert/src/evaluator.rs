//! Pattern predicates and the evaluation pass

use crate::indicators::IndicatorProvider;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use watch_core::alert::params;
use watch_core::{AlertDefinition, AlertPattern, Quote, TriggeredAlert};

/// Evaluates alert definitions against current quotes
///
/// Holds nothing but the indicator provider; every call works entirely on
/// the definitions and quotes passed in.
pub struct AlertEvaluator {
    indicators: Arc<dyn IndicatorProvider>,
}

impl AlertEvaluator {
    pub fn new(indicators: Arc<dyn IndicatorProvider>) -> Self {
        Self { indicators }
    }

    /// One evaluation pass over `alerts` against `quotes`.
    ///
    /// Disabled alerts are skipped before anything is read for them. An alert
    /// whose symbol has no quote, or whose pattern needs a signal the
    /// provider cannot supply, is skipped silently: neither triggered nor an
    /// error. The returned list preserves the input order of `alerts`.
    pub fn evaluate(
        &self,
        alerts: &[AlertDefinition],
        quotes: &HashMap<String, Quote>,
    ) -> Vec<TriggeredAlert> {
        let mut triggered = Vec::new();

        for alert in alerts {
            if !alert.enabled {
                continue;
            }
            let Some(quote) = quotes.get(&alert.symbol) else {
                debug!(alert_id = %alert.id, symbol = %alert.symbol, "no quote for alert symbol, skipping");
                continue;
            };

            if let Some(reason) = self.check(alert, quote) {
                triggered.push(TriggeredAlert {
                    alert_id: alert.id.clone(),
                    symbol: alert.symbol.clone(),
                    pattern: alert.pattern,
                    reason,
                    price: quote.price,
                    triggered_at: Utc::now(),
                });
            }
        }

        triggered
    }

    /// Pattern dispatch; `Some(reason)` when the condition holds
    fn check(&self, alert: &AlertDefinition, quote: &Quote) -> Option<String> {
        match alert.pattern {
            AlertPattern::PriceTarget => check_price_target(alert, quote),
            AlertPattern::Momentum => self.check_momentum(alert, quote),
            AlertPattern::VolumeSpike => self.check_volume_spike(alert, quote),
            AlertPattern::Earnings => self.check_earnings(alert, quote),
            AlertPattern::Reversal => self.check_reversal(alert, quote),
        }
    }

    fn check_momentum(&self, alert: &AlertDefinition, quote: &Quote) -> Option<String> {
        let threshold = alert.parameters.number(params::RSI_THRESHOLD)?;
        let rsi = self.indicators.rsi(&quote.symbol)?;

        // Overbought above the threshold, oversold below its complement
        if rsi >= threshold {
            Some(format!("RSI {rsi:.1} at or above {threshold:.1}"))
        } else if rsi <= 100.0 - threshold {
            Some(format!("RSI {rsi:.1} at or below {:.1}", 100.0 - threshold))
        } else {
            None
        }
    }

    fn check_volume_spike(&self, alert: &AlertDefinition, quote: &Quote) -> Option<String> {
        let multiplier = alert.parameters.number(params::MULTIPLIER)?;
        let average = self.indicators.average_volume(&quote.symbol)?;

        let spike_floor = multiplier * average;
        if quote.volume as f64 >= spike_floor {
            Some(format!(
                "volume {} is {multiplier:.1}x the average {average:.0}",
                quote.volume
            ))
        } else {
            None
        }
    }

    fn check_earnings(&self, alert: &AlertDefinition, quote: &Quote) -> Option<String> {
        let window = alert.parameters.number(params::DAYS_BEFORE_EARNINGS)?;
        let days = self.indicators.earnings_in_days(&quote.symbol)?;

        if f64::from(days) > window {
            return None;
        }
        // Optional volatility gate: only alert when the stock is moving
        if let Some(threshold) = alert.parameters.number(params::VOLATILITY_THRESHOLD) {
            if quote.percent_change.abs() / 100.0 < threshold {
                return None;
            }
        }
        Some(format!("earnings in {days} day(s)"))
    }

    fn check_reversal(&self, alert: &AlertDefinition, quote: &Quote) -> Option<String> {
        let hammer = alert.parameters.flag(params::HAMMER_PATTERN).unwrap_or(false);
        let breakout = alert
            .parameters
            .flag(params::SUPPORT_RESISTANCE_BREAK)
            .unwrap_or(false);
        if !hammer && !breakout {
            return None;
        }

        if self.indicators.reversal_signal(&quote.symbol) {
            Some("reversal pattern detected".to_string())
        } else {
            None
        }
    }
}

fn check_price_target(alert: &AlertDefinition, quote: &Quote) -> Option<String> {
    let upper = alert.parameters.number(params::UPPER_BOUND);
    let lower = alert.parameters.number(params::LOWER_BOUND);

    if let Some(upper) = upper {
        if quote.price >= upper {
            return Some(format!("price {:.2} crossed above {upper:.2}", quote.price));
        }
    }
    if let Some(lower) = lower {
        if quote.price <= lower {
            return Some(format!("price {:.2} crossed below {lower:.2}", quote.price));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{NullIndicators, StaticIndicators};
    use watch_core::AlertParams;

    fn quotes_with(symbol: &str, price: f64, volume: u64) -> HashMap<String, Quote> {
        let mut quotes = HashMap::new();
        quotes.insert(symbol.to_string(), Quote::new(symbol, price, volume));
        quotes
    }

    fn price_alert(symbol: &str, upper: f64, lower: f64) -> AlertDefinition {
        AlertDefinition::new(
            symbol,
            AlertPattern::PriceTarget,
            AlertParams::new()
                .with_number(params::UPPER_BOUND, upper)
                .with_number(params::LOWER_BOUND, lower),
        )
        .unwrap()
    }

    fn null_evaluator() -> AlertEvaluator {
        AlertEvaluator::new(Arc::new(NullIndicators))
    }

    #[test]
    fn test_price_target_upper_bound() {
        let evaluator = null_evaluator();
        let alerts = vec![price_alert("AAPL", 200.0, 160.0)];

        let triggered = evaluator.evaluate(&alerts, &quotes_with("AAPL", 210.0, 1_000));
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].alert_id, alerts[0].id);
        assert_eq!(triggered[0].price, 210.0);
        assert!(triggered[0].reason.contains("above"));
    }

    #[test]
    fn test_price_target_inside_corridor() {
        let evaluator = null_evaluator();
        let alerts = vec![price_alert("AAPL", 200.0, 160.0)];

        let triggered = evaluator.evaluate(&alerts, &quotes_with("AAPL", 180.0, 1_000));
        assert!(triggered.is_empty());
    }

    #[test]
    fn test_price_target_lower_bound() {
        let evaluator = null_evaluator();
        let alerts = vec![price_alert("AAPL", 200.0, 160.0)];

        let triggered = evaluator.evaluate(&alerts, &quotes_with("AAPL", 155.0, 1_000));
        assert_eq!(triggered.len(), 1);
        assert!(triggered[0].reason.contains("below"));
    }

    #[test]
    fn test_disabled_alert_never_triggers() {
        let evaluator = null_evaluator();
        let alerts = vec![price_alert("AAPL", 200.0, 160.0).with_enabled(false)];

        let triggered = evaluator.evaluate(&alerts, &quotes_with("AAPL", 500.0, 1_000));
        assert!(triggered.is_empty());
    }

    #[test]
    fn test_missing_quote_skips_alert() {
        let evaluator = null_evaluator();
        let alerts = vec![price_alert("MSFT", 200.0, 160.0)];

        let triggered = evaluator.evaluate(&alerts, &quotes_with("AAPL", 500.0, 1_000));
        assert!(triggered.is_empty());
    }

    #[test]
    fn test_momentum_threshold_and_complement() {
        let alerts = vec![
            AlertDefinition::new(
                "TSLA",
                AlertPattern::Momentum,
                AlertParams::new().with_number(params::RSI_THRESHOLD, 70.0),
            )
            .unwrap(),
        ];
        let quotes = quotes_with("TSLA", 248.75, 1_000);

        let overbought = AlertEvaluator::new(Arc::new(
            StaticIndicators::new().with_rsi("TSLA", 74.0),
        ));
        assert_eq!(overbought.evaluate(&alerts, &quotes).len(), 1);

        let oversold = AlertEvaluator::new(Arc::new(
            StaticIndicators::new().with_rsi("TSLA", 25.0),
        ));
        assert_eq!(oversold.evaluate(&alerts, &quotes).len(), 1);

        let neutral = AlertEvaluator::new(Arc::new(
            StaticIndicators::new().with_rsi("TSLA", 50.0),
        ));
        assert!(neutral.evaluate(&alerts, &quotes).is_empty());
    }

    #[test]
    fn test_momentum_without_rsi_is_skipped() {
        let evaluator = null_evaluator();
        let alerts = vec![
            AlertDefinition::new(
                "TSLA",
                AlertPattern::Momentum,
                AlertParams::new().with_number(params::RSI_THRESHOLD, 70.0),
            )
            .unwrap(),
        ];

        let triggered = evaluator.evaluate(&alerts, &quotes_with("TSLA", 248.75, 1_000));
        assert!(triggered.is_empty());
    }

    #[test]
    fn test_volume_spike() {
        let alerts = vec![
            AlertDefinition::new(
                "GME",
                AlertPattern::VolumeSpike,
                AlertParams::new().with_number(params::MULTIPLIER, 3.0),
            )
            .unwrap(),
        ];
        let evaluator = AlertEvaluator::new(Arc::new(
            StaticIndicators::new().with_average_volume("GME", 10_000.0),
        ));

        assert_eq!(
            evaluator.evaluate(&alerts, &quotes_with("GME", 40.0, 35_000)).len(),
            1
        );
        assert!(
            evaluator
                .evaluate(&alerts, &quotes_with("GME", 40.0, 25_000))
                .is_empty()
        );
    }

    #[test]
    fn test_earnings_window_with_volatility_gate() {
        let alerts = vec![
            AlertDefinition::new(
                "AAPL",
                AlertPattern::Earnings,
                AlertParams::new()
                    .with_number(params::DAYS_BEFORE_EARNINGS, 3.0)
                    .with_number(params::VOLATILITY_THRESHOLD, 0.05),
            )
            .unwrap(),
        ];
        let evaluator = AlertEvaluator::new(Arc::new(
            StaticIndicators::new().with_earnings_in_days("AAPL", 2),
        ));

        // Inside the window but the stock is flat: gated out
        let flat = quotes_with("AAPL", 182.52, 1_000);
        assert!(evaluator.evaluate(&alerts, &flat).is_empty());

        // Moving more than 5%: fires
        let mut moving = quotes_with("AAPL", 182.52, 1_000);
        moving.get_mut("AAPL").unwrap().percent_change = 6.2;
        assert_eq!(evaluator.evaluate(&alerts, &moving).len(), 1);
    }

    #[test]
    fn test_earnings_outside_window() {
        let alerts = vec![
            AlertDefinition::new(
                "AAPL",
                AlertPattern::Earnings,
                AlertParams::new().with_number(params::DAYS_BEFORE_EARNINGS, 3.0),
            )
            .unwrap(),
        ];
        let evaluator = AlertEvaluator::new(Arc::new(
            StaticIndicators::new().with_earnings_in_days("AAPL", 10),
        ));

        assert!(
            evaluator
                .evaluate(&alerts, &quotes_with("AAPL", 182.52, 1_000))
                .is_empty()
        );
    }

    #[test]
    fn test_reversal_needs_signal_and_flag() {
        let alerts = vec![
            AlertDefinition::new(
                "GOOGL",
                AlertPattern::Reversal,
                AlertParams::new().with_flag(params::HAMMER_PATTERN, true),
            )
            .unwrap(),
        ];
        let quotes = quotes_with("GOOGL", 139.28, 1_000);

        let with_signal =
            AlertEvaluator::new(Arc::new(StaticIndicators::new().with_reversal("GOOGL")));
        assert_eq!(with_signal.evaluate(&alerts, &quotes).len(), 1);

        let without_signal = null_evaluator();
        assert!(without_signal.evaluate(&alerts, &quotes).is_empty());

        // Flags all disabled: the provider signal alone is not enough
        let flag_off = vec![
            AlertDefinition::new(
                "GOOGL",
                AlertPattern::Reversal,
                AlertParams::new().with_flag(params::HAMMER_PATTERN, false),
            )
            .unwrap(),
        ];
        assert!(with_signal.evaluate(&flag_off, &quotes).is_empty());
    }

    #[test]
    fn test_multiple_alerts_preserve_order() {
        let evaluator = null_evaluator();
        let first = price_alert("AAPL", 100.0, 50.0);
        let second = price_alert("AAPL", 150.0, 50.0);
        let alerts = vec![first.clone(), second.clone()];

        let triggered = evaluator.evaluate(&alerts, &quotes_with("AAPL", 210.0, 1_000));
        assert_eq!(triggered.len(), 2);
        assert_eq!(triggered[0].alert_id, first.id);
        assert_eq!(triggered[1].alert_id, second.id);
    }
}
