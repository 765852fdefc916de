//! Error types for watch-app

use thiserror::Error;
use watch_report::ReportError;
use watch_scheduler::SchedulerError;

/// Result type alias for watch-app
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Report requested for a symbol the quote store does not track
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("configuration error: {0}")]
    Config(String),
}
