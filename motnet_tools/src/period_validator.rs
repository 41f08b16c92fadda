//! Period validator for tasks that must run every `period` µs.
//!
//! Call [`PeriodValidator::tick`] once per activation with the current time.
//! The validator keeps the delta since the previous tick, raises an alert
//! when it exceeds `alert_value`, flags a report every `report_interval`,
//! and optionally bins the deltas in a [`Histogram`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ToolsError;
use crate::histogram::{Histogram, HistogramConfig};

/// Times are absolute or relative microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodValidatorConfig {
    /// Expected period [µs].
    pub period_us: u64,
    /// Delta beyond which [`PeriodValidator::alert`] fires [µs]. Must exceed `period_us`.
    pub alert_value_us: u64,
    /// Time between reports [µs]; 0 disables reporting.
    #[serde(default)]
    pub report_interval_us: u64,
    /// Delta histogram, kept only if valid.
    #[serde(default)]
    pub histogram: HistogramConfig,
}

impl PeriodValidatorConfig {
    pub const fn new(period_us: u64, alert_value_us: u64, report_interval_us: u64, histogram: HistogramConfig) -> Self {
        Self {
            period_us,
            alert_value_us,
            report_interval_us,
            histogram,
        }
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.period_us != 0 && self.period_us < self.alert_value_us
    }
}

#[derive(Debug, Clone)]
pub struct PeriodValidator {
    config: PeriodValidatorConfig,
    histogram: Option<Histogram>,
    previous: Option<u64>,
    delta: u64,
    last_report: u64,
    report_due: bool,
}

impl PeriodValidator {
    /// # Errors
    ///
    /// [`ToolsError::InvalidPeriod`] if `config` is not valid.
    pub fn new(config: PeriodValidatorConfig) -> Result<Self, ToolsError> {
        if !config.is_valid() {
            return Err(ToolsError::InvalidPeriod {
                period: config.period_us,
                alert_value: config.alert_value_us,
            });
        }
        // An invalid histogram layout just disables the histogram.
        let histogram = Histogram::new(config.histogram).ok();
        debug!(
            period_us = config.period_us,
            alert_us = config.alert_value_us,
            histogram = histogram.is_some(),
            "Period validator created"
        );
        Ok(Self {
            config,
            histogram,
            previous: None,
            delta: 0,
            last_report: 0,
            report_due: false,
        })
    }

    #[inline]
    pub fn config(&self) -> &PeriodValidatorConfig {
        &self.config
    }

    /// Record an activation at `now` [µs] and return the delta from the previous one.
    ///
    /// The first tick after creation or [`reset`](Self::reset) only sets the
    /// reference time and returns 0.
    pub fn tick(&mut self, now: u64) -> u64 {
        let Some(previous) = self.previous.replace(now) else {
            self.delta = 0;
            self.last_report = now;
            self.report_due = false;
            return 0;
        };

        self.delta = now.saturating_sub(previous);
        if let Some(h) = self.histogram.as_mut() {
            h.add(self.delta);
        }

        let interval = self.config.report_interval_us;
        self.report_due = interval != 0 && now.saturating_sub(self.last_report) >= interval;
        if self.report_due {
            self.last_report = now;
        }

        if let Some(delta) = self.alert() {
            warn!(
                delta_us = delta,
                period_us = self.config.period_us,
                alert_us = self.config.alert_value_us,
                "Period exceeded alert value"
            );
        }
        self.delta
    }

    /// Forget all ticks and empty the histogram.
    pub fn reset(&mut self) {
        self.previous = None;
        self.delta = 0;
        self.last_report = 0;
        self.report_due = false;
        if let Some(h) = self.histogram.as_mut() {
            h.reset();
        }
    }

    /// Whether the last tick crossed a report interval.
    #[inline]
    pub fn report(&self) -> bool {
        self.report_due
    }

    /// The last delta, if it exceeds the alert value.
    #[inline]
    pub fn alert(&self) -> Option<u64> {
        (self.delta > self.config.alert_value_us).then_some(self.delta)
    }

    #[inline]
    pub fn delta(&self) -> u64 {
        self.delta
    }

    #[inline]
    pub fn histogram(&self) -> Option<&Histogram> {
        self.histogram.as_ref()
    }
}
