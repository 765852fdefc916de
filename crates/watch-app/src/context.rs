//! Application context: ownership and lifecycle
//!
//! `AppContext` is created once at startup and owns every shared subsystem.
//! `start` registers the standard background jobs; `shutdown` cancels them.
//! Components only ever receive store handles through here.

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::triggers::TriggerLog;
use std::sync::Arc;
use tracing::info;
use watch_alert::{AlertEvaluator, IndicatorProvider, NullIndicators};
use watch_analysis::{AnalysisGenerator, MockAnalysisGenerator};
use watch_core::{AnalysisType, Report};
use watch_report::{PipelineConfig, ReportPipeline};
use watch_scheduler::JobScheduler;
use watch_store::{AlertStore, QuoteStore, ReportStore, seed};

/// Names of the standard background jobs
pub mod jobs {
    pub const QUOTE_REFRESH: &str = "quote-refresh";
    pub const ALERT_CHECK: &str = "alert-check";
    pub const REPORT_CLEANUP: &str = "cleanup-reports";
}

/// Owner of the background core's stores and components
pub struct AppContext {
    config: AppConfig,
    quotes: Arc<QuoteStore>,
    alerts: Arc<AlertStore>,
    reports: Arc<ReportStore>,
    scheduler: Arc<JobScheduler>,
    pipeline: Arc<ReportPipeline>,
    evaluator: Arc<AlertEvaluator>,
    triggers: Arc<TriggerLog>,
}

impl AppContext {
    /// Create a context builder
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::new()
    }

    /// Context with default config, mock generator, and no indicators
    pub fn with_defaults() -> Result<Self> {
        Self::builder().build()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn quotes(&self) -> &Arc<QuoteStore> {
        &self.quotes
    }

    pub fn alerts(&self) -> &Arc<AlertStore> {
        &self.alerts
    }

    pub fn reports(&self) -> &Arc<ReportStore> {
        &self.reports
    }

    pub fn scheduler(&self) -> &Arc<JobScheduler> {
        &self.scheduler
    }

    pub fn pipeline(&self) -> &Arc<ReportPipeline> {
        &self.pipeline
    }

    pub fn triggers(&self) -> &Arc<TriggerLog> {
        &self.triggers
    }

    /// Load the demo watchlist and alert definitions
    pub fn seed_demo_data(&self) {
        seed::seed_quotes(&self.quotes);
        seed::seed_alerts(&self.alerts);
    }

    /// Register the standard background jobs and begin ticking.
    ///
    /// Fails with a scheduler error if called while the jobs are already
    /// registered and active.
    pub fn start(&self) -> Result<()> {
        let quotes = Arc::clone(&self.quotes);
        self.scheduler.register(
            jobs::QUOTE_REFRESH,
            self.config.quote_refresh_interval,
            move || {
                let quotes = Arc::clone(&quotes);
                async move {
                    quotes.refresh_all();
                    Ok(())
                }
            },
        )?;

        let alerts = Arc::clone(&self.alerts);
        let quotes = Arc::clone(&self.quotes);
        let evaluator = Arc::clone(&self.evaluator);
        let triggers = Arc::clone(&self.triggers);
        self.scheduler.register(
            jobs::ALERT_CHECK,
            self.config.alert_sweep_interval,
            move || {
                let alerts = Arc::clone(&alerts);
                let quotes = Arc::clone(&quotes);
                let evaluator = Arc::clone(&evaluator);
                let triggers = Arc::clone(&triggers);
                async move {
                    let enabled = alerts.list_enabled();
                    let snapshot = quotes.snapshot();
                    let triggered = evaluator.evaluate(&enabled, &snapshot);
                    for hit in &triggered {
                        info!(
                            alert_id = %hit.alert_id,
                            symbol = %hit.symbol,
                            pattern = %hit.pattern.as_str(),
                            reason = %hit.reason,
                            "alert triggered"
                        );
                    }
                    triggers.record_all(triggered);
                    Ok(())
                }
            },
        )?;

        let reports = Arc::clone(&self.reports);
        let retention = self.config.report_retention;
        self.scheduler.register(
            jobs::REPORT_CLEANUP,
            self.config.report_cleanup_interval,
            move || {
                let reports = Arc::clone(&reports);
                async move {
                    let cutoff = chrono::Utc::now() - chrono::Duration::from_std(retention)?;
                    let removed = reports.prune_completed_before(cutoff);
                    if removed > 0 {
                        info!(removed, "pruned expired reports");
                    }
                    Ok(())
                }
            },
        )?;

        info!("background jobs started");
        Ok(())
    }

    /// Cancel every background job. In-flight invocations finish on their own.
    pub fn shutdown(&self) {
        self.scheduler.stop_all();
        info!("background jobs stopped");
    }

    /// Queue a report for a tracked symbol.
    ///
    /// The symbol must be present in the quote store, mirroring the
    /// watchlist-membership check of the request layer.
    pub fn request_report(&self, symbol: &str, analysis_type: AnalysisType) -> Result<Report> {
        let symbol = symbol.trim().to_uppercase();
        if !self.quotes.contains(&symbol) {
            return Err(AppError::UnknownSymbol(symbol));
        }
        Ok(self.pipeline.create(symbol, analysis_type))
    }
}

/// Builder for AppContext
pub struct AppContextBuilder {
    config: Option<AppConfig>,
    generator: Option<Arc<dyn AnalysisGenerator>>,
    indicators: Option<Arc<dyn IndicatorProvider>>,
}

impl AppContextBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            generator: None,
            indicators: None,
        }
    }

    /// Set the configuration (validated again at build time)
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the analysis generator collaborator
    pub fn generator(mut self, generator: Arc<dyn AnalysisGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set the indicator provider collaborator
    pub fn indicators(mut self, indicators: Arc<dyn IndicatorProvider>) -> Self {
        self.indicators = Some(indicators);
        self
    }

    /// Build the context
    pub fn build(self) -> Result<AppContext> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let generator = self
            .generator
            .unwrap_or_else(|| Arc::new(MockAnalysisGenerator::new()));
        let indicators = self
            .indicators
            .unwrap_or_else(|| Arc::new(NullIndicators));

        let quotes = Arc::new(QuoteStore::new());
        let alerts = Arc::new(AlertStore::new());
        let reports = Arc::new(ReportStore::new());
        let scheduler = Arc::new(JobScheduler::new());

        let pipeline_config = PipelineConfig {
            tick_period: config.report_tick_period,
            min_step: config.report_min_step,
            max_step: config.report_max_step,
        };
        let pipeline = Arc::new(ReportPipeline::with_config(
            Arc::clone(&reports),
            generator,
            pipeline_config,
        ));
        let evaluator = Arc::new(AlertEvaluator::new(indicators));

        Ok(AppContext {
            config,
            quotes,
            alerts,
            reports,
            scheduler,
            pipeline,
            evaluator,
            triggers: Arc::new(TriggerLog::new()),
        })
    }
}

impl Default for AppContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
