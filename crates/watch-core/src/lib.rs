//! Shared domain types for the stock-watchlist background core
//!
//! This crate defines the data model used by every other crate in the
//! workspace: market quotes, alert definitions, analysis reports, and the
//! structured analysis results reports carry when they complete. It holds no
//! behavior beyond construction and validation; stores and components live in
//! their own crates.

pub mod alert;
pub mod analysis;
pub mod error;
pub mod ids;
pub mod quote;
pub mod report;

pub use alert::{AlertDefinition, AlertParams, AlertPattern, ParamValue, TriggeredAlert};
pub use analysis::{AnalysisResult, AnalysisSection, AnalysisType, Confidence};
pub use error::{Error, Result};
pub use ids::short_id;
pub use quote::Quote;
pub use report::{Report, ReportProgress, ReportStatus};
