//! Pipeline and per-report progress drivers

use crate::error::{ReportError, Result};
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};
use watch_analysis::AnalysisGenerator;
use watch_core::{AnalysisType, Report, ReportProgress, ReportStatus};
use watch_store::ReportStore;

/// Timing knobs for the simulated generation
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Period between progress increments of one report
    pub tick_period: Duration,
    /// Smallest progress increment per tick, percent
    pub min_step: u8,
    /// Largest progress increment per tick, percent
    pub max_step: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(800),
            min_step: 5,
            max_step: 40,
        }
    }
}

impl PipelineConfig {
    /// Step bounds with a floor of 1, so every report eventually finishes.
    fn step_bounds(&self) -> (u8, u8) {
        let lo = self.min_step.max(1);
        (lo, self.max_step.max(lo))
    }
}

/// Drives reports from creation to a terminal state
///
/// `create` is the only way a driver starts, and a driver exits as soon as
/// its report is terminal; no external actor can attach a second driver to
/// an id. Queries are pure reads against the backing store.
pub struct ReportPipeline {
    reports: Arc<ReportStore>,
    generator: Arc<dyn AnalysisGenerator>,
    config: PipelineConfig,
}

impl ReportPipeline {
    pub fn new(reports: Arc<ReportStore>, generator: Arc<dyn AnalysisGenerator>) -> Self {
        Self::with_config(reports, generator, PipelineConfig::default())
    }

    pub fn with_config(
        reports: Arc<ReportStore>,
        generator: Arc<dyn AnalysisGenerator>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            reports,
            generator,
            config,
        }
    }

    /// Queue a new report and start its progress driver.
    ///
    /// Returns the report as stored: QUEUED at zero progress.
    pub fn create(&self, symbol: impl Into<String>, analysis_type: AnalysisType) -> Report {
        let report = Report::new(symbol, analysis_type);
        self.reports.insert(report.clone());
        info!(report_id = %report.id, symbol = %report.symbol, kind = %analysis_type, "report queued");

        self.spawn_driver(&report);
        report
    }

    /// Progress view of a report, live or archived
    pub fn status(&self, id: &str) -> Result<ReportProgress> {
        self.reports
            .get(id)
            .map(|r| r.progress_view())
            .ok_or_else(|| ReportError::NotFound(id.to_string()))
    }

    /// Bare progress percentage of a report
    pub fn progress(&self, id: &str) -> Result<u8> {
        self.status(id).map(|s| s.progress)
    }

    /// Full report, live or archived
    pub fn report(&self, id: &str) -> Result<Report> {
        self.reports
            .get(id)
            .ok_or_else(|| ReportError::NotFound(id.to_string()))
    }

    /// Spawn the one driver task this report will ever have.
    fn spawn_driver(&self, report: &Report) {
        let id = report.id.clone();
        let symbol = report.symbol.clone();
        let analysis_type = report.analysis_type;
        let reports = Arc::clone(&self.reports);
        let generator = Arc::clone(&self.generator);
        let (lo, hi) = self.config.step_bounds();
        let tick_period = self.config.tick_period;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick_period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The immediate first tick is consumed here: the report stays
            // QUEUED for one full period before progress starts.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let step = rand::rng().random_range(lo..=hi);
                let mut progress_now = 0u8;
                let found = reports.update(&id, |r| {
                    // First increment marks the report as in progress
                    if r.status == ReportStatus::Queued {
                        r.status = ReportStatus::Processing;
                    }
                    r.progress = r.progress.saturating_add(step).min(100);
                    progress_now = r.progress;
                });

                if !found {
                    warn!(report_id = %id, "report vanished mid-generation, stopping its driver");
                    return;
                }
                if progress_now >= 100 {
                    break;
                }
            }

            match generator.generate(&symbol, analysis_type).await {
                Ok(result) => {
                    reports.update(&id, |r| {
                        r.status = ReportStatus::Completed;
                        r.result = Some(result);
                        r.completed_at = Some(Utc::now());
                    });
                    info!(report_id = %id, symbol = %symbol, "report completed");
                }
                Err(e) => {
                    reports.update(&id, |r| {
                        r.status = ReportStatus::Failed;
                        r.error = Some(e.to_string());
                        r.completed_at = Some(Utc::now());
                    });
                    error!(report_id = %id, symbol = %symbol, error = %e, "report generation failed");
                }
            }

            reports.archive(&id);
        });
    }
}
