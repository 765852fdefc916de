//! Market quote model
//!
//! A `Quote` is the complete market snapshot for one symbol. The quote store
//! replaces the whole value on every refresh tick; nothing merges fields into
//! an existing quote, so a `Quote` handed to a reader is immutable by
//! construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current market data for a single symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol, uppercase
    pub symbol: String,
    /// Last traded price
    pub price: f64,
    /// Session open price
    pub open: f64,
    /// Session high
    pub high: f64,
    /// Session low
    pub low: f64,
    /// Session volume
    pub volume: u64,
    /// Percent change against the session open
    pub percent_change: f64,
    /// When this quote was produced
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Create a fresh quote with `price` as open/high/low and zero change.
    pub fn new(symbol: impl Into<String>, price: f64, volume: u64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            open: price,
            high: price,
            low: price,
            volume,
            percent_change: 0.0,
            timestamp: Utc::now(),
        }
    }
}
