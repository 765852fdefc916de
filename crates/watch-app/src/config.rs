//! Application configuration

use crate::error::{AppError, Result};
use std::time::Duration;

/// Intervals and timing knobs for the background core
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How often the quote store replays its random walk
    pub quote_refresh_interval: Duration,

    /// How often enabled alerts are evaluated
    pub alert_sweep_interval: Duration,

    /// How often expired archived reports are pruned
    pub report_cleanup_interval: Duration,

    /// How long terminal reports stay queryable before pruning
    pub report_retention: Duration,

    /// Period between progress increments of one report
    pub report_tick_period: Duration,

    /// Smallest progress increment per tick, percent
    pub report_min_step: u8,

    /// Largest progress increment per tick, percent
    pub report_max_step: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            quote_refresh_interval: Duration::from_secs(5 * 60),
            alert_sweep_interval: Duration::from_secs(2 * 60),
            report_cleanup_interval: Duration::from_secs(6 * 3600),
            report_retention: Duration::from_secs(24 * 3600),
            report_tick_period: Duration::from_millis(800),
            report_min_step: 5,
            report_max_step: 40,
        }
    }
}

impl AppConfig {
    /// Create a new configuration builder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.quote_refresh_interval.is_zero()
            || self.alert_sweep_interval.is_zero()
            || self.report_cleanup_interval.is_zero()
            || self.report_tick_period.is_zero()
        {
            return Err(AppError::Config(
                "job and tick intervals must be non-zero".to_string(),
            ));
        }
        if self.report_retention.is_zero() {
            return Err(AppError::Config(
                "report_retention must be non-zero".to_string(),
            ));
        }
        if self.report_min_step == 0 || self.report_min_step > self.report_max_step {
            return Err(AppError::Config(
                "report step range must satisfy 1 <= min <= max".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    quote_refresh_interval: Option<Duration>,
    alert_sweep_interval: Option<Duration>,
    report_cleanup_interval: Option<Duration>,
    report_retention: Option<Duration>,
    report_tick_period: Option<Duration>,
    report_min_step: Option<u8>,
    report_max_step: Option<u8>,
}

impl AppConfigBuilder {
    pub fn quote_refresh_interval(mut self, interval: Duration) -> Self {
        self.quote_refresh_interval = Some(interval);
        self
    }

    pub fn alert_sweep_interval(mut self, interval: Duration) -> Self {
        self.alert_sweep_interval = Some(interval);
        self
    }

    pub fn report_cleanup_interval(mut self, interval: Duration) -> Self {
        self.report_cleanup_interval = Some(interval);
        self
    }

    pub fn report_retention(mut self, retention: Duration) -> Self {
        self.report_retention = Some(retention);
        self
    }

    pub fn report_tick_period(mut self, period: Duration) -> Self {
        self.report_tick_period = Some(period);
        self
    }

    pub fn report_step_range(mut self, min: u8, max: u8) -> Self {
        self.report_min_step = Some(min);
        self.report_max_step = Some(max);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig> {
        let defaults = AppConfig::default();

        let config = AppConfig {
            quote_refresh_interval: self
                .quote_refresh_interval
                .unwrap_or(defaults.quote_refresh_interval),
            alert_sweep_interval: self
                .alert_sweep_interval
                .unwrap_or(defaults.alert_sweep_interval),
            report_cleanup_interval: self
                .report_cleanup_interval
                .unwrap_or(defaults.report_cleanup_interval),
            report_retention: self.report_retention.unwrap_or(defaults.report_retention),
            report_tick_period: self
                .report_tick_period
                .unwrap_or(defaults.report_tick_period),
            report_min_step: self.report_min_step.unwrap_or(defaults.report_min_step),
            report_max_step: self.report_max_step.unwrap_or(defaults.report_max_step),
        };

        config.validate()?;
        Ok(config)
    }
}
