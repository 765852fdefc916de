//! Named-job scheduler
//!
//! Runs registered tasks on independent timers. Each job enforces mutual
//! exclusion with itself: a tick that arrives while the previous invocation
//! is still running is skipped (and counted), never queued or overlapped.
//! Task failures are caught at the scheduler boundary, logged, and recorded;
//! they never affect the job's future schedule or any other job.

pub mod error;
pub mod scheduler;

pub use error::{Result, SchedulerError};
pub use scheduler::{JobScheduler, JobStatus, TaskFailure};
