//! Error types for watch-scheduler

use thiserror::Error;

/// Result type alias for watch-scheduler
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Registration-time misuse; nothing here is raised by a running job
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// `register` called with a name that is already active
    #[error("job `{0}` is already registered")]
    DuplicateJob(String),

    /// A zero interval would spin the timer
    #[error("job `{0}` registered with a zero interval")]
    InvalidInterval(String),
}
