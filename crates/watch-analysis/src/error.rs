//! Error types for watch-analysis

use thiserror::Error;

/// Result type alias for watch-analysis
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Generator failure, recovered by failing the requesting report
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The backing generator could not produce content
    #[error("analysis generation failed: {0}")]
    Generation(String),

    /// The generator refused the symbol outright
    #[error("no analysis available for symbol {0}")]
    UnknownSymbol(String),
}
