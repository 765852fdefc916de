//! Owned in-memory stores for the watchlist application
//!
//! Every store here is an explicitly owned object handed to consumers by
//! `Arc`; there is no ambient global state. All data is process-memory only
//! and lost on restart.
//!
//! Write discipline:
//! - quotes are only mutated by [`QuoteStore::refresh_all`] (the refresh job),
//! - alert definitions are only mutated through [`AlertStore`]'s own methods
//!   (driven by the API layer),
//! - reports are only mutated by the report pipeline via
//!   [`ReportStore::update`].
//!
//! Locks guard a single entity's read-modify-write at a time; there are no
//! cross-entity transactions.

pub mod alerts;
pub mod quotes;
pub mod reports;
pub mod seed;

pub use alerts::AlertStore;
pub use quotes::QuoteStore;
pub use reports::ReportStore;
