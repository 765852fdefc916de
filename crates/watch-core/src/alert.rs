//! Alert definitions and trigger records
//!
//! An `AlertDefinition` pairs a symbol with a detection pattern and a bag of
//! pattern-specific parameters. The pattern is fixed for the lifetime of the
//! alert (it defines which parameters make sense); callers may only toggle
//! `enabled` and replace the parameter values.

use crate::error::{Error, Result};
use crate::ids::short_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known parameter keys, per pattern
pub mod params {
    /// Upper price bound (PRICE_TARGET)
    pub const UPPER_BOUND: &str = "upperBound";
    /// Lower price bound (PRICE_TARGET)
    pub const LOWER_BOUND: &str = "lowerBound";
    /// RSI trigger threshold (MOMENTUM)
    pub const RSI_THRESHOLD: &str = "rsiThreshold";
    /// Volume multiple over the average (VOLUME_SPIKE)
    pub const MULTIPLIER: &str = "multiplier";
    /// Days-before-earnings window (EARNINGS)
    pub const DAYS_BEFORE_EARNINGS: &str = "daysBeforeEarnings";
    /// Optional volatility gate, fraction of price (EARNINGS)
    pub const VOLATILITY_THRESHOLD: &str = "volatilityThreshold";
    /// Enable hammer-candle detection (REVERSAL)
    pub const HAMMER_PATTERN: &str = "hammerPatternDetection";
    /// Enable support/resistance break detection (REVERSAL)
    pub const SUPPORT_RESISTANCE_BREAK: &str = "supportResistanceBreak";
}

/// Detection pattern an alert watches for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertPattern {
    PriceTarget,
    Momentum,
    Reversal,
    VolumeSpike,
    Earnings,
}

impl AlertPattern {
    /// Stable wire name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceTarget => "PRICE_TARGET",
            Self::Momentum => "MOMENTUM",
            Self::Reversal => "REVERSAL",
            Self::VolumeSpike => "VOLUME_SPIKE",
            Self::Earnings => "EARNINGS",
        }
    }

    /// Check that `parameters` satisfies this pattern's schema.
    ///
    /// Each pattern needs at least its core knob to be present with the right
    /// shape; extra keys are ignored.
    pub fn validate_params(&self, parameters: &AlertParams) -> Result<()> {
        let missing = |key: &str| Error::MissingParameter {
            pattern: self.as_str().to_string(),
            key: key.to_string(),
        };

        match self {
            Self::PriceTarget => {
                if parameters.number(params::UPPER_BOUND).is_none()
                    && parameters.number(params::LOWER_BOUND).is_none()
                {
                    return Err(missing(params::UPPER_BOUND));
                }
            }
            Self::Momentum => {
                if parameters.number(params::RSI_THRESHOLD).is_none() {
                    return Err(missing(params::RSI_THRESHOLD));
                }
            }
            Self::VolumeSpike => {
                if parameters.number(params::MULTIPLIER).is_none() {
                    return Err(missing(params::MULTIPLIER));
                }
            }
            Self::Earnings => {
                if parameters.number(params::DAYS_BEFORE_EARNINGS).is_none() {
                    return Err(missing(params::DAYS_BEFORE_EARNINGS));
                }
            }
            Self::Reversal => {
                if parameters.flag(params::HAMMER_PATTERN).is_none()
                    && parameters.flag(params::SUPPORT_RESISTANCE_BREAK).is_none()
                {
                    return Err(missing(params::HAMMER_PATTERN));
                }
            }
        }

        Ok(())
    }
}

/// A single parameter value: numeric threshold or on/off flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Flag(bool),
}

/// Pattern-specific parameter bag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertParams(HashMap<String, ParamValue>);

impl AlertParams {
    /// Create an empty parameter bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric parameter
    pub fn with_number(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key.into(), ParamValue::Number(value));
        self
    }

    /// Add a flag parameter
    pub fn with_flag(mut self, key: impl Into<String>, value: bool) -> Self {
        self.0.insert(key.into(), ParamValue::Flag(value));
        self
    }

    /// Read a numeric parameter; `None` if absent or not a number
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(ParamValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    /// Read a flag parameter; `None` if absent or not a flag
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(ParamValue::Flag(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A configured alert on one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDefinition {
    /// Unique id, `alert-` prefixed
    pub id: String,
    /// Watched symbol, uppercase
    pub symbol: String,
    /// Detection pattern; fixed after creation
    pub pattern: AlertPattern,
    /// Disabled alerts are never evaluated
    pub enabled: bool,
    /// Pattern-specific thresholds and flags
    pub parameters: AlertParams,
    pub created_at: DateTime<Utc>,
}

impl AlertDefinition {
    /// Create an enabled alert, validating the symbol and parameter schema.
    pub fn new(
        symbol: impl Into<String>,
        pattern: AlertPattern,
        parameters: AlertParams,
    ) -> Result<Self> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(Error::InvalidSymbol(symbol));
        }
        pattern.validate_params(&parameters)?;

        Ok(Self {
            id: format!("alert-{}", short_id()),
            symbol: symbol.trim().to_uppercase(),
            pattern,
            enabled: true,
            parameters,
            created_at: Utc::now(),
        })
    }

    /// Set the enabled flag at construction time
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// One evaluator hit: an enabled alert whose condition held for the current quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredAlert {
    pub alert_id: String,
    pub symbol: String,
    pub pattern: AlertPattern,
    /// Human-readable description of what fired
    pub reason: String,
    /// Price at evaluation time
    pub price: f64,
    pub triggered_at: DateTime<Utc>,
}
