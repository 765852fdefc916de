//! Generator trait

use crate::error::Result;
use async_trait::async_trait;
use watch_core::{AnalysisResult, AnalysisType};

/// Produces the structured content of a finished report
///
/// Implementations may fail; the pipeline converts a failure into a FAILED
/// report rather than propagating it.
#[async_trait]
pub trait AnalysisGenerator: Send + Sync {
    /// Synthesize an analysis of `symbol` of the requested kind.
    async fn generate(&self, symbol: &str, analysis_type: AnalysisType) -> Result<AnalysisResult>;
}
