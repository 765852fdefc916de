//! Alert evaluation
//!
//! [`AlertEvaluator::evaluate`] is a pure function of (alert definitions,
//! current quotes): it returns the alerts whose conditions hold and does
//! nothing else. Dispatching notifications or persisting trigger history is
//! the caller's business.
//!
//! Momentum, volume, earnings, and reversal patterns depend on derived
//! signals (RSI, average volume, earnings calendar, candle patterns) this
//! core does not compute; an [`IndicatorProvider`] supplies them, and an
//! alert whose signal is unavailable is skipped rather than fired.

pub mod evaluator;
pub mod indicators;

pub use evaluator::AlertEvaluator;
pub use indicators::{IndicatorProvider, NullIndicators, StaticIndicators};
