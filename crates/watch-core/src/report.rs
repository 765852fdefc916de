//! Report model and lifecycle states
//!
//! A report moves QUEUED -> PROCESSING -> COMPLETED | FAILED, never backward.
//! `progress` only grows while the report is live, and `result` is populated
//! exactly when the report completes. The report pipeline is the only writer;
//! everything else sees clones.

use crate::analysis::{AnalysisResult, AnalysisType};
use crate::ids::short_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl ReportStatus {
    /// Terminal states never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// One requested analysis report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique id, `report-` prefixed
    pub id: String,
    pub symbol: String,
    pub analysis_type: AnalysisType,
    pub status: ReportStatus,
    /// Generation progress, 0..=100, non-decreasing
    pub progress: u8,
    pub requested_at: DateTime<Utc>,
    /// Set when the report reaches a terminal state
    pub completed_at: Option<DateTime<Utc>>,
    /// Present iff status is COMPLETED
    pub result: Option<AnalysisResult>,
    /// Present iff status is FAILED
    pub error: Option<String>,
}

impl Report {
    /// Create a queued report at zero progress.
    pub fn new(symbol: impl Into<String>, analysis_type: AnalysisType) -> Self {
        Self {
            id: format!("report-{}", short_id()),
            symbol: symbol.into(),
            analysis_type,
            status: ReportStatus::Queued,
            progress: 0,
            requested_at: Utc::now(),
            completed_at: None,
            result: None,
            error: None,
        }
    }

    /// Progress-query view of this report.
    pub fn progress_view(&self) -> ReportProgress {
        ReportProgress {
            id: self.id.clone(),
            symbol: self.symbol.clone(),
            status: self.status,
            progress: self.progress,
            requested_at: self.requested_at,
            completed_at: self.completed_at,
        }
    }
}

/// Lightweight status view served to progress polls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportProgress {
    pub id: String,
    pub symbol: String,
    pub status: ReportStatus,
    pub progress: u8,
    pub requested_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_queued() {
        let report = Report::new("AAPL", AnalysisType::Technical);
        assert_eq!(report.status, ReportStatus::Queued);
        assert_eq!(report.progress, 0);
        assert!(report.id.starts_with("report-"));
        assert!(report.completed_at.is_none());
        assert!(report.result.is_none());
        assert!(report.error.is_none());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ReportStatus::Queued.is_terminal());
        assert!(!ReportStatus::Processing.is_terminal());
        assert!(ReportStatus::Completed.is_terminal());
        assert!(ReportStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(ReportStatus::Queued).unwrap(),
            serde_json::json!("QUEUED")
        );
        assert_eq!(
            serde_json::to_value(ReportStatus::Processing).unwrap(),
            serde_json::json!("PROCESSING")
        );
    }

    #[test]
    fn test_progress_view_mirrors_report() {
        let report = Report::new("TSLA", AnalysisType::Full);
        let view = report.progress_view();
        assert_eq!(view.id, report.id);
        assert_eq!(view.status, ReportStatus::Queued);
        assert_eq!(view.progress, 0);
    }
}
