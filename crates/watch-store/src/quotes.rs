//! Quote store and the simulated refresh tick
//!
//! The store maps symbol -> current [`Quote`]. Readers always receive clones;
//! the only mutation of existing entries is [`QuoteStore::refresh_all`],
//! which replaces each quote wholesale with the next step of a small random
//! walk. That keeps every handed-out quote a stable snapshot.

use rand::Rng;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;
use watch_core::Quote;

/// Smallest price the random walk can reach
const PRICE_FLOOR: f64 = 0.01;

/// In-memory symbol -> quote table
pub struct QuoteStore {
    quotes: RwLock<HashMap<String, Quote>>,
}

impl Default for QuoteStore {
    fn default() -> Self {
        Self {
            quotes: RwLock::new(HashMap::new()),
        }
    }
}

impl QuoteStore {
    /// Create an empty quote store
    pub fn new() -> Self {
        Self::default()
    }

    /// Current quote for `symbol`, if tracked
    pub fn get(&self, symbol: &str) -> Option<Quote> {
        let quotes = self.quotes.read().unwrap();
        quotes.get(symbol).cloned()
    }

    /// Read-only copy of every tracked quote
    pub fn snapshot(&self) -> HashMap<String, Quote> {
        let quotes = self.quotes.read().unwrap();
        quotes.clone()
    }

    /// Start (or reset) tracking of a symbol
    pub fn insert(&self, quote: Quote) {
        let mut quotes = self.quotes.write().unwrap();
        quotes.insert(quote.symbol.clone(), quote);
    }

    /// Stop tracking a symbol
    pub fn remove(&self, symbol: &str) -> Option<Quote> {
        let mut quotes = self.quotes.write().unwrap();
        quotes.remove(symbol)
    }

    /// Whether `symbol` is tracked
    pub fn contains(&self, symbol: &str) -> bool {
        let quotes = self.quotes.read().unwrap();
        quotes.contains_key(symbol)
    }

    /// Tracked symbols, sorted
    pub fn symbols(&self) -> Vec<String> {
        let quotes = self.quotes.read().unwrap();
        let mut symbols: Vec<String> = quotes.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        let quotes = self.quotes.read().unwrap();
        quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advance every quote one step of the simulated random walk.
    ///
    /// Each entry is replaced with a newly built quote: price moves up to
    /// +-1%, clamped positive; high/low stretch to include the new price;
    /// volume gets a small additive burst; `percent_change` is recomputed
    /// against the session open. Returns the number of quotes refreshed.
    pub fn refresh_all(&self) -> usize {
        let mut quotes = self.quotes.write().unwrap();
        let mut rng = rand::rng();

        for quote in quotes.values_mut() {
            let drift: f64 = rng.random_range(-0.01..0.01);
            let price = (quote.price * (1.0 + drift)).max(PRICE_FLOOR);
            let volume = quote.volume + rng.random_range(0..50_000);
            let percent_change = if quote.open > 0.0 {
                (price - quote.open) / quote.open * 100.0
            } else {
                0.0
            };

            *quote = Quote {
                symbol: quote.symbol.clone(),
                price,
                open: quote.open,
                high: quote.high.max(price),
                low: quote.low.min(price),
                volume,
                percent_change,
                timestamp: chrono::Utc::now(),
            };
        }

        debug!(count = quotes.len(), "refreshed quotes");
        quotes.len()
    }
}
