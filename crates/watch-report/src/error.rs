//! Error types for watch-report

use thiserror::Error;

/// Result type alias for watch-report
pub type Result<T> = std::result::Result<T, ReportError>;

/// Query-side errors; generation failures become FAILED reports instead
#[derive(Error, Debug)]
pub enum ReportError {
    /// No live or archived report with this id
    #[error("report {0} not found")]
    NotFound(String),
}
