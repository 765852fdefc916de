//! Report-generation pipeline
//!
//! Owns a report's lifecycle from creation to its terminal state:
//! QUEUED -> PROCESSING -> COMPLETED | FAILED. Each report gets its own
//! progress-driver task; drivers never share a timer and stop themselves
//! once the report is terminal, so there is at most one driver per report id
//! for its whole life.

pub mod error;
pub mod pipeline;

pub use error::{ReportError, Result};
pub use pipeline::{PipelineConfig, ReportPipeline};
